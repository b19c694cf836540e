mod error;
mod validation;
