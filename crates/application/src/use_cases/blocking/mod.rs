mod check_block;

pub use check_block::CheckBlockUseCase;
