pub mod alpha_beta;
pub mod minimax;
pub mod random;
pub mod search;

pub use alpha_beta::AlphaBeta;
pub use minimax::{minimax, Minimax, MinimaxAI};
pub use random::RandomAI;
pub use search::{
    best_move, best_move_parallel, best_move_with_value, select_move, select_move_parallel,
    select_with, GameSearch, SearchStrategy, Selection,
};
