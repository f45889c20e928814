//! Static demo fixture the store is seeded from at process start.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::sale::{Category, LeadSource, Sale, SaleStatus};
use crate::domain::seller::{Seller, SellerRole};
use crate::domain::stage::FunnelStage;
use crate::domain::unit::Unit;

/// Initial contents for an [`crate::repository::InMemoryRepository`].
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub units: Vec<Unit>,
    pub sellers: Vec<Seller>,
    pub unit_seller_links: HashMap<i64, Vec<i64>>,
    pub monthly_goal_cents: i64,
    pub sales: Vec<Sale>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn unit(id: i64, name: &str) -> Unit {
    Unit {
        id,
        name: name.to_string(),
        active: true,
    }
}

fn seller(id: i64, name: &str, role: SellerRole, email: &str, phone: &str) -> Seller {
    Seller {
        id,
        name: name.to_string(),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        role,
        active: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn sale(
    id: i64,
    registered_at: NaiveDate,
    unit: &str,
    seller: &str,
    customer: &str,
    phone: &str,
    category: Category,
    source: LeadSource,
    status: SaleStatus,
    stage: FunnelStage,
    initial_value_cents: i64,
    sale_value_cents: i64,
) -> Sale {
    Sale {
        id,
        registered_at,
        unit: unit.to_string(),
        seller: seller.to_string(),
        customer: customer.to_string(),
        phone: phone.to_string(),
        category,
        source,
        status,
        stage,
        initial_value_cents,
        sale_value_cents,
        qualification: None,
        expected_close: None,
        city: None,
        address: None,
        messenger: None,
        email: None,
        social_handles: None,
    }
}

/// The demo data set: five units, five sellers, a link table, a monthly
/// goal of 50 000.00, and a representative sample of pipeline deals.
pub fn demo_data() -> SeedData {
    let units = vec![
        unit(1, "São Paulo"),
        unit(2, "Rio de Janeiro"),
        unit(3, "Belo Horizonte"),
        unit(4, "Porto Alegre"),
        unit(5, "Curitiba"),
    ];

    let sellers = vec![
        seller(
            1,
            "Ana Silva",
            SellerRole::Manager,
            "ana.silva@empresa.com.br",
            "(11) 99999-0001",
        ),
        seller(
            2,
            "Bruno Costa",
            SellerRole::TeamMember,
            "bruno.costa@empresa.com.br",
            "(21) 99999-0002",
        ),
        seller(
            3,
            "Cláudia Martins",
            SellerRole::TeamMember,
            "claudia.martins@empresa.com.br",
            "(31) 99999-0003",
        ),
        seller(
            4,
            "Daniel Almeida",
            SellerRole::TeamMember,
            "daniel.almeida@empresa.com.br",
            "(51) 99999-0004",
        ),
        seller(
            5,
            "Eduardo Lima",
            SellerRole::Master,
            "eduardo.lima@empresa.com.br",
            "(41) 99999-0005",
        ),
    ];

    let unit_seller_links = HashMap::from([
        (1, vec![1, 3]),
        (2, vec![2]),
        (3, vec![3]),
        (4, vec![4]),
        (5, vec![5]),
    ]);

    let sales = vec![
        sale(
            101,
            date(2025, 8, 18),
            "São Paulo",
            "Ana Silva",
            "Transportes Horizonte",
            "(11) 98888-1001",
            Category::ProductA,
            LeadSource::Website,
            SaleStatus::Closed,
            FunnelStage::Closing,
            800_000,
            850_000,
        ),
        sale(
            102,
            date(2025, 8, 11),
            "Rio de Janeiro",
            "Bruno Costa",
            "Padaria Central",
            "(21) 98888-1002",
            Category::ServiceX,
            LeadSource::Referral,
            SaleStatus::Active,
            FunnelStage::Negotiation,
            320_000,
            0,
        ),
        sale(
            103,
            date(2025, 8, 5),
            "São Paulo",
            "Cláudia Martins",
            "Construtora Alvorada",
            "(11) 98888-1003",
            Category::ProductB,
            LeadSource::TradeShow,
            SaleStatus::Active,
            FunnelStage::Prospecting,
            1_250_000,
            0,
        ),
        sale(
            104,
            date(2025, 7, 29),
            "Belo Horizonte",
            "Cláudia Martins",
            "Farmácia Bem Estar",
            "(31) 98888-1004",
            Category::ServiceY,
            LeadSource::Ad,
            SaleStatus::Lost,
            FunnelStage::Lost,
            150_000,
            150_000,
        ),
        sale(
            105,
            date(2025, 7, 21),
            "Porto Alegre",
            "Daniel Almeida",
            "Estúdio Paralelo",
            "(51) 98888-1005",
            Category::ProductA,
            LeadSource::Website,
            SaleStatus::Closed,
            FunnelStage::Closing,
            400_000,
            420_000,
        ),
        sale(
            106,
            date(2025, 7, 14),
            "Curitiba",
            "Eduardo Lima",
            "Colégio Nova Era",
            "(41) 98888-1006",
            Category::ServiceX,
            LeadSource::Referral,
            SaleStatus::Active,
            FunnelStage::Lead,
            560_000,
            0,
        ),
        sale(
            107,
            date(2025, 6, 30),
            "Rio de Janeiro",
            "Bruno Costa",
            "Oficina do Sabor",
            "(21) 98888-1007",
            Category::ProductB,
            LeadSource::Ad,
            SaleStatus::Closed,
            FunnelStage::Closing,
            275_000,
            300_000,
        ),
        sale(
            108,
            date(2025, 6, 12),
            "São Paulo",
            "Ana Silva",
            "Clínica Vida Plena",
            "(11) 98888-1008",
            Category::ServiceY,
            LeadSource::Website,
            SaleStatus::Active,
            FunnelStage::Negotiation,
            980_000,
            0,
        ),
    ];

    SeedData {
        units,
        sellers,
        unit_seller_links,
        monthly_goal_cents: 5_000_000,
        sales,
    }
}
