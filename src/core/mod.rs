pub mod aesthetic;
pub mod geometry;
pub mod table;
pub mod value;

pub use aesthetic::{Aesthetic, AestheticSlot, AestheticValue, CustomAesthetic, Mapping};
pub use geometry::{Geometry, GeometryCatalog, Parameters, RequiredAesthetics};
pub use table::DataTable;
pub use value::Value;
