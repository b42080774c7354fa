//! First-run seeding
//!
//! Each collection is seeded only when it has never been written. Demo orders
//! are built from whatever dishes and users are stored at that point.

use super::{Collection, StorageResult, Store};
use shared::models::{
    DiningTable, Dish, FALLBACK_CATEGORY, Order, OrderItem, OrderStatus, Role, User,
};
use shared::util::now_millis;

const DEFAULT_PASSWORD: &str = "password";

/// (id, name, email, role, image)
const DEFAULT_USERS: [(&str, &str, &str, Role, Option<&str>); 5] = [
    ("u1", "Admin Master", "admin@restaurante.com", Role::Admin, Some("img/users/admin_master.jpg")),
    ("u2", "Garçom Silva", "garcom@restaurante.com", Role::Waiter, Some("img/users/garcom_silva.jpg")),
    ("u3", "Garçonete Souza", "garcom2@restaurante.com", Role::Waiter, None),
    ("u4", "Cozinheiro Chef", "cozinha@restaurante.com", Role::Kitchen, Some("img/users/cozinheiro_chef.jpg")),
    ("u5", "Ajudante Cozinha", "cozinha2@restaurante.com", Role::Kitchen, None),
];

const DEFAULT_TABLE_COUNT: u32 = 20;

/// Tables seated at first run: (id, guests)
const OCCUPIED_TABLES: [(&str, u32); 5] = [("t2", 4), ("t5", 2), ("t8", 5), ("t12", 1), ("t17", 3)];

/// (id, name, description, price, category, image slug)
const DEFAULT_DISHES: [(&str, &str, &str, f64, &str, &str); 25] = [
    ("d1", "Bruschetta Tradicional", "Pão italiano tostado com tomate, alho, manjericão e azeite.", 22.50, "Entradas", "bruschetta_tradicional"),
    ("d2", "Carpaccio de Carne", "Finas fatias de carne bovina crua com molho de alcaparras e parmesão.", 35.00, "Entradas", "carpaccio_de_carne"),
    ("d3", "Dadinhos de Tapioca", "Cubos de tapioca com queijo coalho fritos, servidos com melaço.", 28.00, "Entradas", "dadinhos_de_tapioca"),
    ("d4", "Salada Caesar com Frango", "Alface romana, croutons, parmesão, molho Caesar e tiras de frango grelhado.", 38.00, "Saladas", "salada_caesar_com_frango"),
    ("d5", "Salada Caprese", "Tomate, mussarela de búfala, manjericão fresco e pesto.", 32.00, "Saladas", "salada_caprese"),
    ("d6", "Salada de Quinoa", "Quinoa, pepino, tomate cereja, pimentão, cebola roxa e coentro com molho cítrico.", 35.00, "Saladas", "salada_de_quinoa"),
    ("d7", "Spaghetti Carbonara", "Massa longa com molho à base de ovos, queijo pecorino, pancetta e pimenta do reino.", 45.00, "Massas", "spaghetti_carbonara"),
    ("d8", "Fettuccine Alfredo", "Massa fresca com molho cremoso de queijo parmesão e manteiga.", 42.00, "Massas", "fettuccine_alfredo"),
    ("d9", "Lasanha à Bolonhesa", "Camadas de massa, molho bolonhesa, molho branco e queijo gratinado.", 48.00, "Massas", "lasanha_a_bolonhesa"),
    ("d10", "Picanha Grelhada", "Fatia generosa de picanha grelhada no ponto desejado, acompanha farofa e vinagrete.", 65.00, "Carnes", "picanha_grelhada"),
    ("d11", "Filé Mignon ao Molho Madeira", "Medalhão de filé mignon grelhado com molho madeira e champignons.", 72.00, "Carnes", "file_mignon_ao_molho_madeira"),
    ("d12", "Costela Suína BBQ", "Costelinha de porco assada lentamente com molho barbecue caseiro.", 58.00, "Carnes", "costela_suina_bbq"),
    ("d13", "Salmão Grelhado com Legumes", "Posta de salmão grelhada com azeite e ervas, servida com legumes salteados.", 68.00, "Peixes", "salmao_grelhado_com_legumes"),
    ("d14", "Moqueca de Peixe Baiana", "Peixe cozido no leite de coco, azeite de dendê, pimentões e coentro.", 75.00, "Peixes", "moqueca_de_peixe_baiana"),
    ("d15", "Tilápia à Belle Meunière", "Filé de tilápia grelhado na manteiga com alcaparras, champignon e camarões.", 62.00, "Peixes", "tilapia_a_belle_meuniere"),
    ("d16", "Frango à Parmegiana", "Filé de frango empanado, coberto com molho de tomate e queijo mussarela gratinado.", 46.00, "Aves", "frango_a_parmegiana"),
    ("d17", "Risoto de Frango com Açafrão", "Arroz arbóreo cremoso com cubos de frango, açafrão e parmesão.", 52.00, "Aves", "risoto_de_frango_com_acafrao"),
    ("d18", "Coxa e Sobrecoxa Assada", "Frango assado lentamente com ervas e batatas coradas.", 40.00, "Aves", "coxa_e_sobrecoxa_assada"),
    ("d19", "Pudim de Leite Condensado", "Clássico pudim de leite condensado com calda de caramelo.", 18.00, "Sobremesas", "pudim_de_leite_condensado"),
    ("d20", "Petit Gateau com Sorvete", "Bolinho quente de chocolate com centro cremoso, servido com sorvete de creme.", 25.00, "Sobremesas", "petit_gateau_com_sorvete"),
    ("d21", "Mousse de Maracujá", "Mousse leve e aerada de maracujá com calda da fruta.", 20.00, "Sobremesas", "mousse_de_maracuja"),
    ("d22", "Suco Natural de Laranja", "300ml de suco de laranja feito na hora.", 10.00, "Bebidas", "suco_natural_de_laranja"),
    ("d23", "Refrigerante Lata", "Coca-Cola, Guaraná Antarctica, etc.", 6.00, "Bebidas", "refrigerante_lata"),
    ("d24", "Água Mineral com Gás", "Garrafa 300ml.", 5.00, "Bebidas", "agua_mineral_com_gas"),
    ("d25", "Café Espresso", "Café curto e intenso.", 7.00, "Bebidas", "cafe_espresso"),
];

const MINUTE_MS: i64 = 60_000;

/// Seed every collection that is still absent.
///
/// Returns the collections that were written.
pub fn seed_defaults(store: &dyn Store) -> StorageResult<Vec<Collection>> {
    let mut seeded = Vec::new();

    if !store.has_collection(Collection::Users)? {
        store.save_users(&default_users())?;
        seeded.push(Collection::Users);
    }
    if !store.has_collection(Collection::Tables)? {
        store.save_tables(&default_tables())?;
        seeded.push(Collection::Tables);
    }
    if !store.has_collection(Collection::Dishes)? {
        store.save_dishes(&default_dishes())?;
        seeded.push(Collection::Dishes);
    }
    if !store.has_collection(Collection::Orders)? {
        let orders = demo_orders(&store.users()?, &store.dishes()?, now_millis());
        store.save_orders(&orders)?;
        seeded.push(Collection::Orders);
    }

    if seeded.is_empty() {
        tracing::debug!("Store already initialized, skipping seed");
    } else {
        let names: Vec<&str> = seeded.iter().map(Collection::key).collect();
        tracing::info!(collections = ?names, "Seeded default data");
    }
    Ok(seeded)
}

fn default_users() -> Vec<User> {
    DEFAULT_USERS
        .iter()
        .map(|(id, name, email, role, image)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: *role,
            password: DEFAULT_PASSWORD.to_string(),
            image_ref: image.map(str::to_string),
        })
        .collect()
}

fn default_tables() -> Vec<DiningTable> {
    (1..=DEFAULT_TABLE_COUNT)
        .map(|number| {
            let mut table = DiningTable::new(format!("t{}", number), number);
            if let Some((_, people)) = OCCUPIED_TABLES.iter().find(|(id, _)| *id == table.id) {
                table.occupy(*people);
            }
            table
        })
        .collect()
}

fn default_dishes() -> Vec<Dish> {
    DEFAULT_DISHES
        .iter()
        .map(|(id, name, description, price, category, slug)| Dish {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: *price,
            category: category.to_string(),
            image_ref: Some(format!("img/dishes/{}.jpg", slug)),
        })
        .collect()
}

/// One demo order: (table, status, author is admin, created min ago, updated min ago, lines)
struct DemoOrder {
    table_id: &'static str,
    table_number: u32,
    status: OrderStatus,
    by_admin: bool,
    created_ago_min: i64,
    updated_ago_min: i64,
    /// (dish id, quantity, observation)
    lines: &'static [(&'static str, u32, &'static str)],
}

const DEMO_ORDERS: [DemoOrder; 6] = [
    DemoOrder {
        table_id: "t2",
        table_number: 2,
        status: OrderStatus::Requested,
        by_admin: false,
        created_ago_min: 15,
        updated_ago_min: 15,
        lines: &[("d1", 1, ""), ("d23", 2, "Coca Zero"), ("d23", 2, "")],
    },
    DemoOrder {
        table_id: "t5",
        table_number: 5,
        status: OrderStatus::Preparing,
        by_admin: true,
        created_ago_min: 10,
        updated_ago_min: 5,
        lines: &[("d9", 1, "Sem cebola")],
    },
    DemoOrder {
        table_id: "t8",
        table_number: 8,
        status: OrderStatus::Completed,
        by_admin: false,
        created_ago_min: 20,
        updated_ago_min: 2,
        lines: &[("d16", 2, ""), ("d16", 2, ""), ("d22", 2, ""), ("d22", 2, "")],
    },
    DemoOrder {
        table_id: "t12",
        table_number: 12,
        status: OrderStatus::Requested,
        by_admin: false,
        created_ago_min: 5,
        updated_ago_min: 5,
        lines: &[("d21", 1, "")],
    },
    DemoOrder {
        table_id: "t17",
        table_number: 17,
        status: OrderStatus::Preparing,
        by_admin: true,
        created_ago_min: 2,
        updated_ago_min: 1,
        lines: &[("d10", 1, "Ao ponto"), ("d24", 1, "")],
    },
    DemoOrder {
        table_id: "t5",
        table_number: 5,
        status: OrderStatus::Completed,
        by_admin: false,
        created_ago_min: 30,
        updated_ago_min: 28,
        lines: &[("d1", 1, ""), ("d22", 1, "")],
    },
];

fn demo_orders(users: &[User], dishes: &[Dish], now: i64) -> Vec<Order> {
    let admin = users
        .iter()
        .find(|u| u.role == Role::Admin)
        .map(|u| (u.id.clone(), u.name.clone()))
        .unwrap_or_else(|| ("u1".to_string(), "Admin Master".to_string()));
    let waiter = users
        .iter()
        .find(|u| u.email == "garcom@restaurante.com")
        .map(|u| (u.id.clone(), u.name.clone()))
        .unwrap_or_else(|| ("u2".to_string(), "Garçom Silva".to_string()));

    DEMO_ORDERS
        .iter()
        .filter_map(|demo| {
            let mut items: Vec<OrderItem> = Vec::new();
            for (dish_id, quantity, observation) in demo.lines {
                let Some(dish) = dishes.iter().find(|d| d.id == *dish_id) else {
                    continue;
                };
                // Duplicate (dish, observation) lines collapse into one
                if let Some(existing) = items
                    .iter_mut()
                    .find(|i| i.dish_id == *dish_id && i.observation == *observation)
                {
                    existing.quantity += quantity;
                    continue;
                }
                let category = if dish.category.is_empty() {
                    FALLBACK_CATEGORY.to_string()
                } else {
                    dish.category.clone()
                };
                items.push(OrderItem {
                    dish_id: dish.id.clone(),
                    name: dish.name.clone(),
                    price: dish.price,
                    quantity: *quantity,
                    observation: observation.to_string(),
                    category,
                });
            }
            if items.is_empty() {
                return None;
            }

            let created_at = now - demo.created_ago_min * MINUTE_MS;
            let (user_id, user_name) = if demo.by_admin { &admin } else { &waiter };
            Some(Order {
                order_id: format!("o{}", created_at),
                table_id: demo.table_id.to_string(),
                table_number: demo.table_number,
                items,
                status: demo.status,
                created_at,
                updated_at: now - demo.updated_ago_min * MINUTE_MS,
                created_by_user_id: user_id.clone(),
                created_by_user_name: user_name.clone(),
                released_at: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shared::models::TableStatus;

    #[test]
    fn test_seed_fills_empty_store() {
        let store = MemoryStore::new();
        let seeded = seed_defaults(&store).unwrap();
        assert_eq!(seeded, Collection::ALL.to_vec());

        let users = store.users().unwrap();
        assert_eq!(users.len(), 5);
        assert_eq!(users[0].email, "admin@restaurante.com");
        assert!(users[2].image_ref.is_none());

        let tables = store.tables().unwrap();
        assert_eq!(tables.len(), 20);
        let occupied: Vec<_> = tables
            .iter()
            .filter(|t| t.status == TableStatus::Occupied)
            .map(|t| (t.id.as_str(), t.occupant_count))
            .collect();
        assert_eq!(occupied, OCCUPIED_TABLES.to_vec());

        assert_eq!(store.dishes().unwrap().len(), 25);
        assert_eq!(store.orders().unwrap().len(), 6);
    }

    #[test]
    fn test_demo_orders_merge_duplicate_lines() {
        let store = MemoryStore::new();
        seed_defaults(&store).unwrap();
        let orders = store.orders().unwrap();

        let t8 = orders.iter().find(|o| o.table_id == "t8").unwrap();
        assert_eq!(t8.items.len(), 2);
        assert_eq!(t8.items[0].quantity, 4);
        assert_eq!(t8.created_by_user_name, "Garçom Silva");

        let t2 = orders.iter().find(|o| o.table_id == "t2").unwrap();
        assert_eq!(t2.items.len(), 3);
        assert_eq!(t2.items[1].observation, "Coca Zero");
    }

    #[test]
    fn test_seed_never_overwrites() {
        let store = MemoryStore::new();
        store.save_tables(&[DiningTable::new("t99", 99)]).unwrap();
        store.save_orders(&[]).unwrap();

        let seeded = seed_defaults(&store).unwrap();
        assert_eq!(seeded, vec![Collection::Users, Collection::Dishes]);
        assert_eq!(store.tables().unwrap().len(), 1);
        assert!(store.orders().unwrap().is_empty());

        assert!(seed_defaults(&store).unwrap().is_empty());
    }
}
