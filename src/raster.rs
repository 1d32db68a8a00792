pub(crate) mod image;
mod transform;
