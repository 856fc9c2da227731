//! SeaORM entities for the three staffing tables.

pub mod assignment;
pub mod engineer;
pub mod project;
