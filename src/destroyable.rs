// implemented where a subscription closure keeps its owner alive, so the
// cycle has to be broken by hand
pub trait Destroyable {
    fn destroy(&mut self);
}
