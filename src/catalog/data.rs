//! Built-in menu of the house

use rust_decimal::Decimal;

use super::{Category, Dish};

fn dish(
    key: &str,
    name: &str,
    category: Category,
    ingredients: &[&str],
    description: &str,
    cents: i64,
    prep_time: &str,
) -> Dish {
    Dish {
        key: key.to_string(),
        name: name.to_string(),
        category,
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        prep_time: prep_time.to_string(),
        available: true,
    }
}

/// The ten Pará dishes, in menu order.
pub fn builtin_dishes() -> Vec<Dish> {
    vec![
        dish(
            "açaí",
            "Açaí",
            Category::Dessert,
            &["açaí", "guaraná", "leite condensado", "granola", "banana", "morango"],
            "Fruto típico da região amazônica, servido como vitamina ou na tigela com acompanhamentos",
            1500,
            "10 minutos",
        ),
        dish(
            "tacacá",
            "Tacacá",
            Category::MainCourse,
            &[
                "tucumã",
                "camarão seco",
                "jambu",
                "broto de feijão",
                "farinha de mandioca",
                "pimenta de cheiro",
            ],
            "Prato típico servido em cuia, com caldo quente e sabor marcante do jambu",
            1200,
            "20 minutos",
        ),
        dish(
            "pato_no_tucumã",
            "Pato no Tucumã",
            Category::MainCourse,
            &["pato", "tucumã", "farinha de mandioca", "pimenta do reino", "alho", "cebola"],
            "Prato tradicional com pato cozido no tucumã, acompanhado de farinha de mandioca",
            3500,
            "45 minutos",
        ),
        dish(
            "maniçoba",
            "Maniçoba",
            Category::MainCourse,
            &[
                "folha de mandioca",
                "carne seca",
                "linguiça",
                "costela de porco",
                "toucinho",
                "feijão",
            ],
            "Prato que leva 7 dias para ficar pronto, feito com folhas de mandioca brava",
            2800,
            "7 dias",
        ),
        dish(
            "caruru",
            "Caruru",
            Category::MainCourse,
            &[
                "quiabo",
                "camarão seco",
                "dendê",
                "amendoim",
                "castanha do pará",
                "pimenta malagueta",
            ],
            "Prato de origem africana adaptado na região amazônica",
            2200,
            "30 minutos",
        ),
        dish(
            "pirarucu_de_casaca",
            "Pirarucu de Casaca",
            Category::MainCourse,
            &[
                "pirarucu",
                "banana da terra",
                "farinha de mandioca",
                "ovos",
                "azeitona",
                "pimentão",
            ],
            "Prato sofisticado com o famoso peixe amazônico em camadas",
            4500,
            "40 minutos",
        ),
        dish(
            "cupuaçu",
            "Doce de Cupuaçu",
            Category::Dessert,
            &["cupuaçu", "açúcar", "leite condensado"],
            "Sobremesa cremosa feita com a fruta típica da Amazônia",
            800,
            "15 minutos",
        ),
        dish(
            "tucumã",
            "Tucumã",
            Category::Appetizer,
            &["tucumã", "farinha de mandioca", "sal"],
            "Fruto amazônico servido com farinha de mandioca e sal",
            1000,
            "5 minutos",
        ),
        dish(
            "vatapá_paraense",
            "Vatapá Paraense",
            Category::MainCourse,
            &[
                "camarão",
                "peixe",
                "leite de coco",
                "dendê",
                "farinha de trigo",
                "amendoim",
                "castanha do pará",
            ],
            "Versão paraense do vatapá, mais encorpado e com castanha do pará",
            2500,
            "35 minutos",
        ),
        dish(
            "farofa_de_banana",
            "Farofa de Banana",
            Category::Side,
            &["farinha de mandioca", "banana da terra", "bacon", "cebola", "alho"],
            "Acompanhamento tradicional feito com banana da terra e farinha de mandioca",
            1200,
            "20 minutos",
        ),
    ]
}
