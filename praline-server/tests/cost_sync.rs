//! End-to-end tests for the cost recalculation pipeline against a real
//! embedded store.

use praline_server::core::{DomainEvent, EventBus};
use praline_server::costing::CostSyncService;
use praline_server::db::DbService;
use praline_server::db::models::{
    IngredientCreate, PackagingCreate, ProductCreate, ProductPackagingItemCreate,
    ProductRecipeItemCreate, RecipeCreate, RecipeItemCreate, RecipeItemKind,
};
use praline_server::db::repository::{
    IngredientRepository, PackagingRepository, ProductRepository, RecipeRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

struct TestStore {
    // Held so the store directory outlives the handle
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

struct Fixture {
    ingredients: IngredientRepository,
    packaging: PackagingRepository,
    recipes: RecipeRepository,
    products: ProductRepository,
    sync: CostSyncService,
    events: EventBus,
}

fn fixture(db: Surreal<Db>) -> Fixture {
    let events = EventBus::new(16);
    Fixture {
        ingredients: IngredientRepository::new(db.clone()),
        packaging: PackagingRepository::new(db.clone()),
        recipes: RecipeRepository::new(db.clone()),
        products: ProductRepository::new(db.clone()),
        sync: CostSyncService::new(db, events.clone()),
        events,
    }
}

/// Seed the worked example: a 4-portion recipe with one base and one
/// per-portion line, sold in a box with one packaging line.
///
/// chocolate 2 @ 1.5 (base) + 4 * (sprinkles 1 @ 0.5) => total 5.0, unit 1.25
/// product: 2 recipe portions (2.5) + 1 gift box (0.30) => 2.80
async fn seed_example(f: &Fixture) -> (String, String) {
    let chocolate = f
        .ingredients
        .create(IngredientCreate {
            name: "Chocolate".into(),
            unit: "g".into(),
            package_quantity: 2.0,
            package_price: 3.0,
        })
        .await
        .unwrap();
    let sprinkles = f
        .ingredients
        .create(IngredientCreate {
            name: "Sprinkles".into(),
            unit: "g".into(),
            package_quantity: 4.0,
            package_price: 2.0,
        })
        .await
        .unwrap();

    let recipe = f
        .recipes
        .create(RecipeCreate {
            name: "Brigadeiro".into(),
            portions: 4,
            notes: None,
        })
        .await
        .unwrap();
    let recipe_id = recipe.id.unwrap().to_string();

    f.recipes
        .add_item(
            &recipe_id,
            RecipeItemCreate {
                ingredient_id: chocolate.id.unwrap().to_string(),
                kind: RecipeItemKind::Base,
                quantity: 2.0,
            },
        )
        .await
        .unwrap();
    f.recipes
        .add_item(
            &recipe_id,
            RecipeItemCreate {
                ingredient_id: sprinkles.id.unwrap().to_string(),
                kind: RecipeItemKind::PerPortion,
                quantity: 1.0,
            },
        )
        .await
        .unwrap();

    let box_packaging = f
        .packaging
        .create(PackagingCreate {
            name: "Gift box".into(),
            bulk_quantity: 10.0,
            bulk_price: 3.0,
        })
        .await
        .unwrap();

    let product = f
        .products
        .create(ProductCreate {
            name: "Brigadeiro box".into(),
            sale_price: Some(8.0),
        })
        .await
        .unwrap();
    let product_id = product.id.unwrap().to_string();

    f.products
        .add_recipe_item(
            &product_id,
            ProductRecipeItemCreate {
                recipe_id: recipe_id.clone(),
                quantity: 2.0,
            },
        )
        .await
        .unwrap();
    f.products
        .add_packaging_item(
            &product_id,
            ProductPackagingItemCreate {
                packaging_id: box_packaging.id.unwrap().to_string(),
                quantity: 1.0,
                is_primary: Some(true),
            },
        )
        .await
        .unwrap();

    (recipe_id, product_id)
}

#[tokio::test]
async fn full_sync_recomputes_the_chain() {
    let store = open_store().await;
    let f = fixture(store.db.clone());
    let (recipe_id, product_id) = seed_example(&f).await;

    let report = f.sync.sync_all().await.unwrap();
    assert_eq!(report.updated_recipes, 1);
    assert_eq!(report.updated_products, 1);
    assert!(report.errors.is_empty(), "unexpected: {:?}", report.errors);

    let recipe = f.recipes.find_by_id(&recipe_id).await.unwrap().unwrap();
    assert_eq!(recipe.total_cost, 5.0);
    assert_eq!(recipe.unit_cost, 1.25);

    let product = f.products.find_by_id(&product_id).await.unwrap().unwrap();
    assert_eq!(product.total_cost, 2.8);

    // Line costs were persisted, not just the aggregates
    let recipe_rid = recipe.id.unwrap();
    let rows = f.recipes.items_with_ingredients(&recipe_rid).await.unwrap();
    let mut line_costs: Vec<f64> = rows.iter().map(|row| row.cost).collect();
    line_costs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(line_costs, vec![0.5, 3.0]);

    let product_rid = product.id.unwrap();
    let recipe_items = f
        .products
        .recipe_items_with_recipes(&product_rid)
        .await
        .unwrap();
    assert_eq!(recipe_items.len(), 1);
    assert_eq!(recipe_items[0].cost, 2.5);

    let packaging_items = f
        .products
        .packaging_items_with_packaging(&product_rid)
        .await
        .unwrap();
    assert_eq!(packaging_items.len(), 1);
    assert_eq!(packaging_items[0].cost, 0.3);
}

#[tokio::test]
async fn sync_twice_is_idempotent() {
    let store = open_store().await;
    let f = fixture(store.db.clone());
    let (recipe_id, product_id) = seed_example(&f).await;

    let first = f.sync.sync_all().await.unwrap();
    let recipe_after_first = f.recipes.find_by_id(&recipe_id).await.unwrap().unwrap();
    let product_after_first = f.products.find_by_id(&product_id).await.unwrap().unwrap();

    let second = f.sync.sync_all().await.unwrap();
    let recipe_after_second = f.recipes.find_by_id(&recipe_id).await.unwrap().unwrap();
    let product_after_second = f.products.find_by_id(&product_id).await.unwrap().unwrap();

    assert_eq!(first.updated_recipes, second.updated_recipes);
    assert_eq!(first.updated_products, second.updated_products);
    assert_eq!(first.errors, second.errors);
    assert_eq!(recipe_after_first.total_cost, recipe_after_second.total_cost);
    assert_eq!(recipe_after_first.unit_cost, recipe_after_second.unit_cost);
    assert_eq!(
        product_after_first.total_cost,
        product_after_second.total_cost
    );
}

#[tokio::test]
async fn leaf_price_change_propagates_in_one_pass() {
    let store = open_store().await;
    let f = fixture(store.db.clone());
    let (recipe_id, product_id) = seed_example(&f).await;
    f.sync.sync_all().await.unwrap();

    // Chocolate doubles in price: unit cost 1.5 -> 3.0
    let chocolate = f
        .ingredients
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Chocolate")
        .unwrap();
    let updated = f
        .ingredients
        .update(
            &chocolate.id.unwrap().to_string(),
            praline_server::db::models::IngredientUpdate {
                name: None,
                unit: None,
                package_quantity: None,
                package_price: Some(6.0),
                is_active: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.unit_cost, 3.0);

    // A single pass reaches the recipe and the product
    let report = f.sync.sync_all().await.unwrap();
    assert!(report.errors.is_empty());

    let recipe = f.recipes.find_by_id(&recipe_id).await.unwrap().unwrap();
    assert_eq!(recipe.total_cost, 8.0); // 2*3.0 + 4*0.5
    assert_eq!(recipe.unit_cost, 2.0);

    let product = f.products.find_by_id(&product_id).await.unwrap().unwrap();
    assert_eq!(product.total_cost, 4.3); // 2*2.0 + 0.30
}

#[tokio::test]
async fn dangling_ingredient_is_isolated() {
    let store = open_store().await;
    let f = fixture(store.db.clone());
    let (healthy_recipe_id, product_id) = seed_example(&f).await;

    // Second recipe whose only ingredient gets deleted
    let butter = f
        .ingredients
        .create(IngredientCreate {
            name: "Butter".into(),
            unit: "g".into(),
            package_quantity: 200.0,
            package_price: 4.0,
        })
        .await
        .unwrap();
    let broken = f
        .recipes
        .create(RecipeCreate {
            name: "Butter cream".into(),
            portions: 2,
            notes: None,
        })
        .await
        .unwrap();
    let broken_id = broken.id.unwrap().to_string();
    f.recipes
        .add_item(
            &broken_id,
            RecipeItemCreate {
                ingredient_id: butter.id.as_ref().unwrap().to_string(),
                kind: RecipeItemKind::Base,
                quantity: 100.0,
            },
        )
        .await
        .unwrap();
    f.ingredients
        .delete(&butter.id.unwrap().to_string())
        .await
        .unwrap();

    let report = f.sync.sync_all().await.unwrap();

    // Both recipes processed; the dangling line is an anomaly, not an abort
    assert_eq!(report.updated_recipes, 2);
    assert_eq!(report.updated_products, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Butter cream"));
    assert!(report.errors[0].contains("priced at zero"));

    // The broken recipe degraded to zero instead of keeping stale costs
    let broken = f.recipes.find_by_id(&broken_id).await.unwrap().unwrap();
    assert_eq!(broken.total_cost, 0.0);
    assert_eq!(broken.unit_cost, 0.0);

    // The healthy chain is untouched by its neighbour's anomaly
    let healthy = f
        .recipes
        .find_by_id(&healthy_recipe_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(healthy.total_cost, 5.0);
    let product = f.products.find_by_id(&product_id).await.unwrap().unwrap();
    assert_eq!(product.total_cost, 2.8);
}

#[tokio::test]
async fn sync_publishes_completion_event() {
    let store = open_store().await;
    let f = fixture(store.db.clone());
    seed_example(&f).await;

    let mut rx = f.events.subscribe();
    f.sync.sync_all().await.unwrap();

    match rx.recv().await.unwrap() {
        DomainEvent::CostsSynced {
            updated_recipes,
            updated_products,
            error_count,
        } => {
            assert_eq!(updated_recipes, 1);
            assert_eq!(updated_products, 1);
            assert_eq!(error_count, 0);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn single_recipe_sync_refreshes_dependent_products() {
    let store = open_store().await;
    let f = fixture(store.db.clone());
    let (recipe_id, product_id) = seed_example(&f).await;
    f.sync.sync_all().await.unwrap();

    // Bump the yield: same lines, 8 portions instead of 4
    f.recipes
        .update(
            &recipe_id,
            praline_server::db::models::RecipeUpdate {
                name: None,
                portions: Some(8),
                notes: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

    let (recipe, anomalies) = f.sync.sync_recipe(&recipe_id).await.unwrap();
    assert!(anomalies.is_empty());
    // total = 3.0 + 8*0.5 = 7.0, unit = 0.875
    assert_eq!(recipe.total_cost, 7.0);
    assert_eq!(recipe.unit_cost, 0.875);

    // The product consuming this recipe was brought along
    let product = f.products.find_by_id(&product_id).await.unwrap().unwrap();
    assert_eq!(product.total_cost, 2.05); // 2*0.875 + 0.30
}
