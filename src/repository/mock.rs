use std::collections::HashMap;

use mockall::mock;

use super::{
    GoalReader, GoalWriter, LinkReader, LinkWriter, RepositoryResult, SaleReader, SaleWriter,
    SellerReader, SellerWriter, UnitReader, UnitWriter,
};
use crate::domain::{
    sale::{NewSale, Sale, SaleFilters},
    seller::{NewSeller, Seller, SellerPatch},
    unit::{NewUnit, Unit},
};

mock! {
    pub SaleReader {}

    impl SaleReader for SaleReader {
        fn get_sale_by_id(&self, id: i64) -> RepositoryResult<Option<Sale>>;
        fn list_sales(&self, filters: &SaleFilters) -> RepositoryResult<Vec<Sale>>;
        fn sale_phone_exists(&self, phone: &str) -> RepositoryResult<bool>;
    }
}

mock! {
    pub SaleWriter {}

    impl SaleWriter for SaleWriter {
        fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
        fn update_sale(&self, sale: &Sale) -> RepositoryResult<Option<Sale>>;
    }
}

mock! {
    pub SaleRepository {}

    impl SaleReader for SaleRepository {
        fn get_sale_by_id(&self, id: i64) -> RepositoryResult<Option<Sale>>;
        fn list_sales(&self, filters: &SaleFilters) -> RepositoryResult<Vec<Sale>>;
        fn sale_phone_exists(&self, phone: &str) -> RepositoryResult<bool>;
    }

    impl SaleWriter for SaleRepository {
        fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
        fn update_sale(&self, sale: &Sale) -> RepositoryResult<Option<Sale>>;
    }
}

mock! {
    pub UnitReader {}

    impl UnitReader for UnitReader {
        fn get_unit_by_id(&self, id: i64) -> RepositoryResult<Option<Unit>>;
        fn list_units(&self, active_only: bool) -> RepositoryResult<Vec<Unit>>;
    }
}

mock! {
    pub UnitWriter {}

    impl UnitWriter for UnitWriter {
        fn create_unit(&self, new_unit: &NewUnit) -> RepositoryResult<Option<Unit>>;
        fn rename_unit(&self, id: i64, name: &str) -> RepositoryResult<Option<Unit>>;
        fn toggle_unit(&self, id: i64) -> RepositoryResult<Option<Unit>>;
        fn delete_unit(&self, id: i64) -> RepositoryResult<()>;
    }
}

mock! {
    pub SellerReader {}

    impl SellerReader for SellerReader {
        fn get_seller_by_id(&self, id: i64) -> RepositoryResult<Option<Seller>>;
        fn list_sellers(&self, active_only: bool) -> RepositoryResult<Vec<Seller>>;
    }
}

mock! {
    pub SellerWriter {}

    impl SellerWriter for SellerWriter {
        fn create_seller(&self, new_seller: &NewSeller) -> RepositoryResult<Option<Seller>>;
        fn update_seller(&self, id: i64, patch: &SellerPatch) -> RepositoryResult<Option<Seller>>;
        fn toggle_seller(&self, id: i64) -> RepositoryResult<Option<Seller>>;
        fn delete_seller(&self, id: i64) -> RepositoryResult<()>;
    }
}

mock! {
    pub LinkReader {}

    impl LinkReader for LinkReader {
        fn sellers_for_unit(&self, unit_id: i64) -> RepositoryResult<Vec<i64>>;
        fn all_links(&self) -> RepositoryResult<HashMap<i64, Vec<i64>>>;
    }
}

mock! {
    pub LinkWriter {}

    impl LinkWriter for LinkWriter {
        fn replace_unit_sellers(&self, unit_id: i64, seller_ids: &[i64]) -> RepositoryResult<()>;
    }
}

mock! {
    pub GoalReader {}

    impl GoalReader for GoalReader {
        fn monthly_goal_cents(&self) -> RepositoryResult<i64>;
    }
}

mock! {
    pub GoalWriter {}

    impl GoalWriter for GoalWriter {
        fn set_monthly_goal_cents(&self, value_cents: i64) -> RepositoryResult<()>;
    }
}
