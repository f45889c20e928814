use sales_pipeline::domain::sale::{Category, LeadSource, SaleFilters, SaleStatus};
use sales_pipeline::domain::stage::FunnelStage;
use sales_pipeline::forms::sales::{AddSaleForm, EditSaleForm, UploadSalesForm};
use sales_pipeline::repository::{InMemoryRepository, SaleReader};
use sales_pipeline::seed;
use sales_pipeline::services::ServiceError;
use sales_pipeline::services::sales;

fn add_form(customer: &str, phone: &str) -> AddSaleForm {
    AddSaleForm {
        unit: "Curitiba".to_string(),
        seller: "Eduardo Lima".to_string(),
        customer: customer.to_string(),
        phone: phone.to_string(),
        category: Category::ServiceX,
        source: LeadSource::Referral,
        initial_value: "4500".to_string(),
        sale_value: "0".to_string(),
        qualification: Some(3),
        expected_close: None,
        city: Some("Curitiba".to_string()),
        address: None,
        messenger: None,
        email: None,
        social_handles: None,
    }
}

#[test]
fn create_sale_registers_and_rejects_duplicate_phone() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());

    let created = sales::create_sale(&repo, add_form("Mercado Aurora", "(41) 97777-3001"))
        .expect("expected sale to be created");
    assert_eq!(created.stage, FunnelStage::Lead);
    assert_eq!(created.initial_value_cents, 450_000);

    // A second submission with the same phone is rejected before the store
    // is touched.
    let result = sales::create_sale(&repo, add_form("Mercado Aurora 2", "(41) 97777-3001"));
    assert!(matches!(
        result,
        Err(ServiceError::Validation { ref field, .. }) if field == "phone"
    ));

    // The seeded phone is also a duplicate.
    let result = sales::create_sale(&repo, add_form("Outro Cliente", "(41) 98888-1006"));
    assert!(result.is_err());

    let listed = sales::list_sales(&repo, &SaleFilters::default()).unwrap();
    assert_eq!(listed.len(), 9);
}

#[test]
fn modify_sale_replaces_the_whole_record() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());
    let existing = repo.get_sale_by_id(106).unwrap().unwrap();

    let form = EditSaleForm {
        sale_id: existing.id,
        registered_at: existing.registered_at,
        unit: existing.unit.clone(),
        seller: existing.seller.clone(),
        customer: existing.customer.clone(),
        phone: existing.phone.clone(),
        category: existing.category,
        source: existing.source,
        status: SaleStatus::Closed,
        stage: FunnelStage::Closing,
        initial_value: "5600".to_string(),
        sale_value: "6100".to_string(),
        qualification: Some(5),
        expected_close: None,
        city: None,
        address: None,
        messenger: None,
        email: None,
        social_handles: None,
    };

    let updated = sales::modify_sale(&repo, form)
        .expect("expected update to succeed")
        .expect("expected the sale to exist");
    assert_eq!(updated.status, SaleStatus::Closed);
    assert_eq!(updated.sale_value_cents, 610_000);

    let reloaded = repo.get_sale_by_id(106).unwrap().unwrap();
    assert_eq!(reloaded.qualification, Some(5));
}

#[test]
fn import_creates_rows_and_skips_duplicate_phones() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());

    let csv = "unit,seller,customer,phone,category,source,sale_value,initial_value\n\
               Curitiba,Eduardo Lima,Mercado Aurora,(41) 97777-4001,Product A,Website,1200.00,900.00\n\
               Curitiba,Eduardo Lima,Padaria Sol,(41) 97777-4002,Service X,Referral,0,450.00\n\
               Curitiba,Eduardo Lima,Duplicada,(41) 98888-1006,Product A,Ad,100.00,\n";
    let form = UploadSalesForm::new(Some("sales.csv".to_string()), csv.as_bytes().to_vec());

    let created = sales::import_sales(&repo, form).expect("expected import to succeed");
    assert_eq!(created, 2);

    let listed = sales::list_sales(&repo, &SaleFilters::default()).unwrap();
    assert_eq!(listed.len(), 10);
    assert!(repo.sale_phone_exists("(41) 97777-4002").unwrap());

    // Every imported row starts as an active lead.
    assert!(
        listed
            .iter()
            .filter(|sale| sale.id > 108)
            .all(|sale| sale.stage == FunnelStage::Lead && sale.status == SaleStatus::Active)
    );
}

#[test]
fn import_rejects_malformed_uploads_wholesale() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());

    let csv = "unit,seller,customer,phone,category,source,sale_value\n\
               Curitiba,Eduardo Lima,Boa Linha,(41) 97777-5001,Product A,Website,1200.00\n\
               Curitiba,Eduardo Lima,Linha Ruim,(41) 97777-5002,Product Z,Website,1200.00\n";
    let form = UploadSalesForm::new(None, csv.as_bytes().to_vec());

    assert!(matches!(
        sales::import_sales(&repo, form),
        Err(ServiceError::Form(_))
    ));

    // Nothing was created, not even the valid first row.
    let listed = sales::list_sales(&repo, &SaleFilters::default()).unwrap();
    assert_eq!(listed.len(), 8);
}
