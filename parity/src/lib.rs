mod parser;
mod solution;


pub use parser::{load_game, parse_parity_game, LoadError, Row};
pub use solution::{parse_solution, write_solution};
