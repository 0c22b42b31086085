//! CRUD and business-rule tests for the catalog, orders and payables
//! against a real embedded store.

use praline_server::db::DbService;
use praline_server::db::models::{
    IngredientCreate, IngredientUpdate, OrderCreate, OrderItemInput, OrderStatus, PayableCreate,
    PayableStatus, ProductCreate, ProductUpdate, RecipeCreate, RecipeItemCreate, RecipeItemKind,
    ResellerCreate,
};
use praline_server::db::repository::{
    IngredientRepository, OrderRepository, PayableRepository, ProductRepository, RecipeRepository,
    RepoError, ResellerRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

struct TestStore {
    _dir: TempDir,
    db: Surreal<Db>,
}

async fn open_store() -> TestStore {
    let dir = TempDir::new().expect("tempdir");
    let service = DbService::new(dir.path()).await.expect("open store");
    TestStore {
        _dir: dir,
        db: service.db,
    }
}

#[tokio::test]
async fn ingredient_unit_cost_is_derived() {
    let store = open_store().await;
    let repo = IngredientRepository::new(store.db.clone());

    // 1kg of flour for 5.00 -> half a cent per gram
    let flour = repo
        .create(IngredientCreate {
            name: "Flour".into(),
            unit: "g".into(),
            package_quantity: 1000.0,
            package_price: 5.0,
        })
        .await
        .unwrap();
    assert_eq!(flour.unit_cost, 0.005);

    // Repackaging rederives the unit cost
    let flour = repo
        .update(
            &flour.id.unwrap().to_string(),
            IngredientUpdate {
                name: None,
                unit: None,
                package_quantity: Some(500.0),
                package_price: None,
                is_active: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(flour.unit_cost, 0.01);
}

#[tokio::test]
async fn zero_package_quantity_yields_zero_unit_cost() {
    let store = open_store().await;
    let repo = IngredientRepository::new(store.db.clone());

    let ingredient = repo
        .create(IngredientCreate {
            name: "Mystery".into(),
            unit: "un".into(),
            package_quantity: 0.0,
            package_price: 9.99,
        })
        .await
        .unwrap();
    assert_eq!(ingredient.unit_cost, 0.0);
}

#[tokio::test]
async fn duplicate_active_names_are_rejected() {
    let store = open_store().await;
    let repo = IngredientRepository::new(store.db.clone());

    let create = IngredientCreate {
        name: "Cocoa".into(),
        unit: "g".into(),
        package_quantity: 100.0,
        package_price: 2.0,
    };
    repo.create(create.clone()).await.unwrap();

    let err = repo.create(create).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {:?}", err);
}

#[tokio::test]
async fn malformed_numbers_are_rejected() {
    let store = open_store().await;
    let repo = IngredientRepository::new(store.db.clone());

    let err = repo
        .create(IngredientCreate {
            name: "Sugar".into(),
            unit: "g".into(),
            package_quantity: f64::NAN,
            package_price: 1.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repo
        .create(IngredientCreate {
            name: "Sugar".into(),
            unit: "g".into(),
            package_quantity: 100.0,
            package_price: -1.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn recipe_lines_require_existing_references() {
    let store = open_store().await;
    let recipes = RecipeRepository::new(store.db.clone());

    let recipe = recipes
        .create(RecipeCreate {
            name: "Ganache".into(),
            portions: 10,
            notes: None,
        })
        .await
        .unwrap();

    let err = recipes
        .add_item(
            &recipe.id.unwrap().to_string(),
            RecipeItemCreate {
                ingredient_id: "ingredient:nope".into(),
                kind: RecipeItemKind::Base,
                quantity: 1.0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn recipe_portions_must_be_positive() {
    let store = open_store().await;
    let recipes = RecipeRepository::new(store.db.clone());

    let err = recipes
        .create(RecipeCreate {
            name: "Empty batch".into(),
            portions: 0,
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn order_totals_snapshot_the_sale_price() {
    let store = open_store().await;
    let products = ProductRepository::new(store.db.clone());
    let orders = OrderRepository::new(store.db.clone());

    let product = products
        .create(ProductCreate {
            name: "Truffle box".into(),
            sale_price: Some(12.5),
        })
        .await
        .unwrap();
    let product_id = product.id.unwrap().to_string();

    let order = orders
        .create(OrderCreate {
            customer_name: "Ana".into(),
            reseller_id: None,
            items: vec![OrderItemInput {
                product_id: product_id.clone(),
                quantity: 3,
            }],
            notes: None,
            delivery_date: None,
        })
        .await
        .unwrap();
    assert_eq!(order.total, 37.5);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items[0].unit_price, 12.5);

    // A later price change must not rewrite the order
    products
        .update(
            &product_id,
            ProductUpdate {
                name: None,
                sale_price: Some(20.0),
                is_active: None,
            },
        )
        .await
        .unwrap();

    let order = orders
        .find_by_id(&order.id.unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.total, 37.5);
    assert_eq!(order.items[0].unit_price, 12.5);
}

#[tokio::test]
async fn orders_reject_empty_and_non_positive_lines() {
    let store = open_store().await;
    let orders = OrderRepository::new(store.db.clone());

    let err = orders
        .create(OrderCreate {
            customer_name: "Ana".into(),
            reseller_id: None,
            items: vec![],
            notes: None,
            delivery_date: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = orders
        .create(OrderCreate {
            customer_name: "Ana".into(),
            reseller_id: None,
            items: vec![OrderItemInput {
                product_id: "product:nope".into(),
                quantity: 0,
            }],
            notes: None,
            delivery_date: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn payables_move_from_pending_to_paid() {
    let store = open_store().await;
    let payables = PayableRepository::new(store.db.clone());

    let invoice = payables
        .create(PayableCreate {
            supplier: "Cocoa Co".into(),
            description: "March delivery".into(),
            amount: 150.0,
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(invoice.status, PayableStatus::Pending);
    assert_eq!(payables.find_pending().await.unwrap().len(), 1);

    let paid = payables
        .set_status(&invoice.id.unwrap().to_string(), PayableStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.status, PayableStatus::Paid);
    assert!(payables.find_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn reseller_commission_is_bounded() {
    let store = open_store().await;
    let resellers = ResellerRepository::new(store.db.clone());

    let err = resellers
        .create(ResellerCreate {
            name: "Maria".into(),
            phone: None,
            commission_percent: Some(150.0),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let reseller = resellers
        .create(ResellerCreate {
            name: "Maria".into(),
            phone: Some("555-0101".into()),
            commission_percent: Some(20.0),
        })
        .await
        .unwrap();
    assert_eq!(reseller.commission_percent, 20.0);
}
