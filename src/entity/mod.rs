pub mod categories;
pub mod products;
pub mod sessions;

pub use categories::Entity as Categories;
pub use products::Entity as Products;
pub use sessions::Entity as Sessions;
