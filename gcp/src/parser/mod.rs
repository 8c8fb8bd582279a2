//! Lecture des fichiers de contrôle hérités

pub mod rows;
pub mod text;
