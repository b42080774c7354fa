//! 营业额幂等性测试 - 随机桌台、随机点单、随机重复结账
//!
//! 当日总额必须等于每张桌台首次结账时的账单总额之和

use chrono::NaiveDate;
use front_house::order_money::{to_decimal, to_f64};
use front_house::{Config, FrontHouse, PendingCart, SessionContext};
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use shared::models::{DishCreate, OrderStatus, Role};
use std::collections::HashMap;

const TABLE_COUNT: i64 = 8;
const ROUNDS: usize = 60;

const MENU: &[(&str, f64, &str)] = &[
    ("Bruschetta", 22.5, "Entradas"),
    ("Salada Caprese", 32.0, "Saladas"),
    ("Lasanha", 48.0, "Massas"),
    ("Picanha", 65.0, "Carnes"),
    ("Pudim", 18.0, "Sobremesas"),
    ("Refrigerante", 6.0, "Bebidas"),
    ("Café", 7.35, "Bebidas"),
];

#[test]
fn daily_total_is_sum_of_first_postings() {
    let config = Config {
        seed_defaults: false,
        ..Config::default()
    };
    let house = FrontHouse::in_memory(&config).unwrap();
    let waiter = SessionContext::new("u2", "Garçom Silva", Role::Waiter);
    let cook = SessionContext::new("u4", "Cozinheiro Chef", Role::Kitchen);
    let mut rng = rand::thread_rng();

    let dish_ids: Vec<String> = MENU
        .iter()
        .map(|(name, price, category)| {
            house
                .catalog
                .add_dish(DishCreate {
                    name: name.to_string(),
                    description: None,
                    price: *price,
                    category: category.to_string(),
                    image_ref: None,
                })
                .unwrap()
                .id
        })
        .collect();

    let mut table_ids = Vec::new();
    for number in 1..=TABLE_COUNT {
        let table = house.catalog.add_table(number).unwrap();
        house
            .orders
            .occupy_table(&table.id, rng.gen_range(1..=6))
            .unwrap();
        table_ids.push(table.id);
    }

    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let mut first_amounts: HashMap<String, f64> = HashMap::new();

    for _ in 0..ROUNDS {
        let table_id = table_ids.choose(&mut rng).unwrap().clone();

        if rng.gen_bool(0.6) {
            let mut cart = PendingCart::new();
            for _ in 0..rng.gen_range(1..=4) {
                let dish_id = dish_ids.choose(&mut rng).unwrap();
                let observation = if rng.gen_bool(0.2) { "sem sal" } else { "" };
                let quantity = rng.gen_range(1..=5);
                house
                    .orders
                    .add_to_cart(&mut cart, Some(dish_id.as_str()), quantity, observation)
                    .unwrap();
            }
            let order = house
                .orders
                .submit_order(&table_id, &mut cart, Some(&waiter))
                .unwrap();
            if rng.gen_bool(0.3) {
                house
                    .orders
                    .update_order_status(&order.order_id, OrderStatus::Cancelled, Some(&cook))
                    .unwrap();
            }
        } else {
            let include_tax = rng.gen_bool(0.5);
            let receipt = house
                .orders
                .open_receipt(&table_id, include_tax, today)
                .unwrap();
            if first_amounts.contains_key(&table_id) {
                assert!(!receipt.posting.posted);
                assert_eq!(receipt.posting.amount, 0.0);
            } else {
                assert!(receipt.posting.posted);
                assert_eq!(receipt.posting.amount, receipt.bill.grand_total);
                first_amounts.insert(table_id, receipt.bill.grand_total);
            }
        }
    }

    let expected = first_amounts
        .values()
        .fold(Decimal::ZERO, |acc, amount| acc + to_decimal(*amount));
    assert_eq!(house.orders.daily_total(today).unwrap(), to_f64(expected));

    let billed = house.orders.billed_tables(today).unwrap();
    assert_eq!(billed.len(), first_amounts.len());
    assert!(first_amounts.keys().all(|id| billed.contains(id)));
}
