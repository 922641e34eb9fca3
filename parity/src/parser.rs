use chumsky::error::Simple;
use chumsky::primitive::{choice, end, filter, just, none_of};
use chumsky::text::{self, TextParser};
use chumsky::Parser;
use spm::{Game, GameBuilder, GameError, Player, Priority};

/// A vertex declaration as written in a PGSolver file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: usize,
    pub priority: Priority,
    pub player: Player,
    pub successors: Vec<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("malformed parity game: {}", describe(.0))]
    Syntax(Vec<Simple<char>>),
    #[error("invalid parity game: {0}")]
    Game(#[from] GameError),
}

fn describe(errors: &[Simple<char>]) -> String {
    let errors = errors.iter().map(|e| format!("{e} at {:?}", e.span())).collect::<Vec<_>>();
    errors.join("; ")
}

pub(crate) fn number() -> impl Parser<char, usize, Error = Simple<char>> + Clone {
    text::int(10)
        .try_map(|n: String, span| n.parse::<usize>().map_err(|e| Simple::custom(span, e)))
        .padded()
}

pub(crate) fn player() -> impl Parser<char, Player, Error = Simple<char>> + Clone {
    choice((just('0').to(Player::Even), just('1').to(Player::Odd)))
}

pub fn parse_parity_game(source: &str) -> Result<Vec<Row>, Vec<Simple<char>>> {
    let parity = just("parity").padded();
    let comma = just(',').padded();
    let semi = just(';');
    let newline = text::newline();

    let header = parity.then(number()).then(semi).then(newline);

    let successors = number().separated_by(comma);
    // Vertex names and anything else up to the `;` are ignored.
    let name = just('"').ignore_then(none_of("\"").repeated()).then_ignore(just('"'));
    let comment = choice((name.ignored(), none_of("\";").ignored())).repeated();
    let owner = player().then_ignore(filter(|c: &char| c.is_whitespace()).repeated().at_least(1));
    let row = number().then(number()).then(owner).then(successors).then_ignore(comment);
    let row = row.map(|(((id, priority), player), successors)| Row {
        id,
        priority,
        player,
        successors,
    });

    let rows = row.then_ignore(semi).separated_by(newline).allow_trailing();
    let game = header.ignore_then(rows).then_ignore(text::whitespace()).then_ignore(end());

    game.parse(source)
}

/// Parses a game and validates it, so that the result can be handed to the solver.
pub fn load_game(source: &str) -> Result<Game, LoadError> {
    let rows = parse_parity_game(source).map_err(LoadError::Syntax)?;

    let mut builder = GameBuilder::new();
    for row in rows {
        builder.add_vertex(row.id, row.priority, row.player, row.successors)?;
    }
    Ok(builder.build()?)
}
