//! Canned replies
//!
//! Fixed texts for the intents that don't render catalog data. The menu,
//! price and dish replies are assembled in `reply.rs` from these headings.

pub const GREETING: &str = "Olá! Bem-vindo ao nosso restaurante paraense! 🌿 Aqui você encontra os melhores sabores da Amazônia. Como posso ajudar você hoje?";

pub const FAREWELL: &str = "Muito obrigado pela visita! Volte sempre para saborear nossa deliciosa culinária paraense. Até logo! 😊";

pub const SUGGESTION: &str = r#"🌟 **Minhas recomendações especiais:**

1. **Tacacá** (R$ 12,00) - O prato mais tradicional do Pará! Servido quentinho na cuia com jambu que "dá choque" na boca.

2. **Pato no Tucumã** (R$ 35,00) - Uma iguaria amazônica! Pato cozido no tucumã, simplesmente irresistível.

3. **Açaí** (R$ 15,00) - O verdadeiro açaí paraense, cremoso e saboroso, do jeito que tem que ser!

Qual desses desperta seu interesse? Posso contar mais detalhes sobre qualquer um! 😋"#;

pub const DISH_INFO: &str = r#"ℹ️ **Sobre nossa culinária paraense:**

Nossa cozinha é uma celebração dos sabores amazônicos! Usamos ingredientes frescos e típicos da região como:

🌿 **Jambu** - A erva que "dá choque" e é essencial no tacacá
🥥 **Tucumã** - Fruto amazônico rico e saboroso
🍤 **Camarão seco** - Tradicional da região
🌾 **Farinha de mandioca** - Acompanha quase tudo!

Cada prato conta uma história da nossa rica cultura amazônica. Qual prato você gostaria de conhecer melhor?"#;

pub const ORDER: &str = r#"🛒 **Vamos fazer seu pedido!**

Para pedir, me diga:
• Qual prato você escolheu?
• Quantas porções?
• Alguma observação especial?

Exemplo: "Quero 2 tacacás e 1 açaí"

Estou aqui para ajudar com seu pedido! 😊"#;

pub const CHIT_CHAT: &str = r#"Olá! Sou seu assistente virtual especializado em culinária paraense! 🌿

Posso ajudar você com:
• 📋 Ver nosso cardápio completo
• 🌟 Sugestões de pratos
• ℹ️ Informações sobre ingredientes
• 💰 Consultar preços
• 🛒 Fazer pedidos

O que você gostaria de saber sobre nossa deliciosa comida paraense?"#;

/// Degraded reply used when a message could not be processed
pub const DEGRADED: &str =
    "Desculpe, tive um problema para processar sua mensagem. Pode tentar novamente?";

pub const MENU_HEADING: &str = "🍽️ **Nosso Cardápio Paraense:**";
pub const MENU_MAIN_COURSES: &str = "**Pratos Principais:**";
pub const MENU_DESSERTS: &str = "**Sobremesas:**";
pub const MENU_CLOSING: &str = "Quer saber mais sobre algum prato específico?";

pub const PRICE_HEADING: &str = "💰 **Nossos preços:**";
pub const PRICE_BUDGET: &str = "**Opções econômicas (até R$ 15):**";
pub const PRICE_SPECIAL: &str = "**Pratos especiais:**";

pub const DISH_CLOSING: &str = "Que tal fazer seu pedido? É uma delícia! 😋";
