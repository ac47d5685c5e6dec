#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Height(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct EdgesCount(pub usize);
