use sales_pipeline::domain::seller::SellerRole;
use sales_pipeline::forms::settings::{
    AddSellerForm, AddUnitForm, EditSellerForm, EditUnitForm, LinkSellersForm, MonthlyGoalForm,
};
use sales_pipeline::repository::{InMemoryRepository, LinkReader, SellerReader, UnitReader};
use sales_pipeline::seed;
use sales_pipeline::services::settings;

#[test]
fn unit_lifecycle_through_the_service_layer() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());

    let created = settings::create_unit(
        &repo,
        AddUnitForm {
            name: "  Salvador ".to_string(),
        },
    )
    .expect("expected create to succeed")
    .expect("expected a fresh name to be accepted");
    assert_eq!(created.name, "Salvador");
    assert!(created.active);

    // Case-insensitive duplicates are silently rejected.
    let duplicate = settings::create_unit(
        &repo,
        AddUnitForm {
            name: "salvador".to_string(),
        },
    )
    .expect("expected create to succeed");
    assert!(duplicate.is_none());

    let renamed = settings::rename_unit(
        &repo,
        EditUnitForm {
            unit_id: created.id,
            name: "Salvador Centro".to_string(),
        },
    )
    .expect("expected rename to succeed")
    .expect("expected the unit to exist");
    assert_eq!(renamed.name, "Salvador Centro");

    let toggled = settings::toggle_unit(&repo, created.id)
        .expect("expected toggle to succeed")
        .expect("expected the unit to exist");
    assert!(!toggled.active);

    settings::remove_unit(&repo, created.id).expect("expected delete to succeed");
    assert!(repo.get_unit_by_id(created.id).unwrap().is_none());
}

#[test]
fn seller_lifecycle_through_the_service_layer() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());

    let created = settings::create_seller(
        &repo,
        AddSellerForm {
            name: "Fernanda Rocha".to_string(),
            email: Some("fernanda@empresa.com.br".to_string()),
            phone: None,
            role: SellerRole::TeamMember,
        },
    )
    .expect("expected create to succeed")
    .expect("expected a fresh name to be accepted");

    let updated = settings::modify_seller(
        &repo,
        EditSellerForm {
            seller_id: created.id,
            name: "Fernanda R. Souza".to_string(),
            email: Some("fernanda@empresa.com.br".to_string()),
            phone: Some("(71) 99999-0006".to_string()),
            role: SellerRole::Manager,
        },
    )
    .expect("expected update to succeed")
    .expect("expected the seller to exist");
    assert_eq!(updated.role, SellerRole::Manager);
    assert_eq!(updated.phone.as_deref(), Some("(71) 99999-0006"));

    settings::remove_seller(&repo, created.id).expect("expected delete to succeed");
    assert!(repo.get_seller_by_id(created.id).unwrap().is_none());
}

#[test]
fn link_assignment_and_goal_update() {
    let repo = InMemoryRepository::with_seed(seed::demo_data());

    settings::assign_unit_sellers(
        &repo,
        LinkSellersForm {
            unit_id: 2,
            seller_ids: vec![4, 1, 4],
        },
    )
    .expect("expected assignment to succeed");
    assert_eq!(repo.sellers_for_unit(2).unwrap(), vec![4, 1]);

    settings::update_monthly_goal(
        &repo,
        MonthlyGoalForm {
            value: "75000.00".to_string(),
        },
    )
    .expect("expected goal update to succeed");

    let page = settings::load_settings_page(&repo).expect("expected page load");
    assert_eq!(page.monthly_goal_cents, 7_500_000);
    assert_eq!(page.units.len(), 5);
    assert_eq!(page.sellers.len(), 5);
    assert_eq!(page.links.get(&2), Some(&vec![4, 1]));
}
