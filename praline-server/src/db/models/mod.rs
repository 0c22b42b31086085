//! Data Models
//!
//! Typed records for every table in the store. Monetary `*_cost` fields are
//! always derived by the costing pipeline, never hand-edited.

pub mod ingredient;
pub mod order;
pub mod packaging;
pub mod payable;
pub mod product;
pub mod recipe;
pub mod reseller;
pub mod serde_helpers;

pub use ingredient::{Ingredient, IngredientCreate, IngredientUpdate};
pub use order::{Order, OrderCreate, OrderItem, OrderItemInput, OrderStatus, OrderStatusUpdate};
pub use packaging::{Packaging, PackagingCreate, PackagingUpdate};
pub use payable::{Payable, PayableCreate, PayableStatus, PayableUpdate};
pub use product::{
    Product, ProductCreate, ProductPackagingItem, ProductPackagingItemCreate,
    ProductPackagingItemUpdate, ProductRecipeItem, ProductRecipeItemCreate,
    ProductRecipeItemUpdate, ProductUpdate,
};
pub use recipe::{
    Recipe, RecipeCreate, RecipeItem, RecipeItemCreate, RecipeItemKind, RecipeItemUpdate,
    RecipeUpdate,
};
pub use reseller::{Reseller, ResellerCreate, ResellerUpdate};
