pub(crate) mod blend;
pub(crate) mod bounds;
pub(crate) mod composite;
pub(crate) mod transform;
