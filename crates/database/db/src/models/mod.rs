/// This module contains the metadata database model.
pub mod metadata;
