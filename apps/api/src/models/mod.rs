pub mod career;
pub mod evaluation;
pub mod institution;
pub mod quiz;
