use crate::*;
pub use stamped::*;

mod stamped;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig, level: Level) -> Board;
}
