use models::errors::ModelError;

/// Field-level checks run on external input before it reaches a service.
pub trait Validate {
    fn validate(&self) -> Result<(), ModelError>;
}
