/// Model layer: the serialized classifier and the prediction entry points.

pub mod artifact;
pub mod predict;
