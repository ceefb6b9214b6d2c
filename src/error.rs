use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("non-finite parameter in {0}")]
    NonFinite(String),
    #[error("non-positive radius {radius} in {shape}")]
    NonPositiveRadius { shape: String, radius: f64 },
    #[error("conic {0} does not describe a real ellipse")]
    NotAnEllipse(String),
}

#[derive(Debug, Error)]
pub enum ArrangementError {
    #[error("arrangement requires at least one shape")]
    Empty,
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("expected 1 region of component [{component}] containing island component [{child}], found {count}")]
    ContainerRegionCount {
        component: String,
        child: String,
        count: usize,
    },
}
