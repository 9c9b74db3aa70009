#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Key {
    Right,
}
