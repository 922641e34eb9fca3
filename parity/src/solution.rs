use std::io::{self, Write};

use chumsky::error::Simple;
use chumsky::primitive::{just, none_of};
use chumsky::text::{self, TextParser};
use chumsky::Parser;
use spm::index::{AsIndex, IndexedVec};
use spm::{Player, VertexId};

use crate::parser::{number, player};

/// Parses a PGSolver `paritysol` file into `(vertex, winner)` pairs. Strategy
/// columns, if any, are ignored.
pub fn parse_solution(source: &str) -> Result<Vec<(usize, Player)>, Vec<Simple<char>>> {
    let paritysol = just("paritysol").padded();
    let semi = just(';');
    let newline = text::newline();

    let header = paritysol.then(number()).then(semi).then(newline);

    let rest = none_of(";").repeated();
    let row = number().then(player()).then_ignore(rest);

    let rows = row.then_ignore(semi).separated_by(newline).allow_trailing();
    let sol = header.ignore_then(rows);

    sol.parse(source)
}

/// Writes the winner of every vertex in `paritysol` format.
pub fn write_solution(
    out: &mut impl Write,
    even_wins: &IndexedVec<VertexId, bool>,
) -> io::Result<()> {
    writeln!(out, "paritysol {};", even_wins.len().saturating_sub(1))?;
    for (v, &even) in even_wins.enumerate() {
        let winner = match even {
            true => 0,
            false => 1,
        };
        writeln!(out, "{} {};", v.to_usize(), winner)?;
    }
    Ok(())
}
