//! Generation sinks.
//!
//! The runner hands every new generation to a [`GenerationSink`]. Sinks
//! observe; they cannot alter the simulation.

use std::io::{self, Write};

use cellum_core::{Cell, GenerationId};
use cellum_space::seed::{encode_line, encode_rows};
use cellum_space::{Grid1D, Grid2D};

/// Receives each generation the runner produces, starting with the seed.
pub trait GenerationSink<L> {
    /// Observe `grid` as generation `generation`.
    fn emit(&mut self, generation: GenerationId, grid: &L) -> io::Result<()>;
}

/// Discards every generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl<L> GenerationSink<L> for NullSink {
    fn emit(&mut self, _generation: GenerationId, _grid: &L) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps a copy of every generation.
#[derive(Clone, Debug)]
pub struct CollectSink<L> {
    /// Emitted generations in order.
    pub generations: Vec<(GenerationId, L)>,
}

impl<L> CollectSink<L> {
    /// An empty sink.
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
        }
    }

    /// The collected grids without their ids.
    pub fn grids(&self) -> impl Iterator<Item = &L> {
        self.generations.iter().map(|(_, g)| g)
    }
}

impl<L> Default for CollectSink<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Clone> GenerationSink<L> for CollectSink<L> {
    fn emit(&mut self, generation: GenerationId, grid: &L) -> io::Result<()> {
        self.generations.push((generation, grid.clone()));
        Ok(())
    }
}

/// Writes each generation as text.
///
/// A 1D generation is one line. A 2D generation is one line per row
/// followed by a blank line. Living cells use their species glyph when
/// one is configured, otherwise the alive glyph.
#[derive(Debug)]
pub struct TextSink<W> {
    out: W,
    dead: char,
    alive: char,
    species: Vec<char>,
}

impl<W: Write> TextSink<W> {
    /// `#` for living cells, a space for dead ones.
    pub fn new(out: W) -> Self {
        Self {
            out,
            dead: ' ',
            alive: '#',
            species: Vec::new(),
        }
    }

    /// Use custom dead / alive glyphs.
    #[must_use]
    pub fn with_glyphs(mut self, dead: char, alive: char) -> Self {
        self.dead = dead;
        self.alive = alive;
        self
    }

    /// Render living cells of species `i` as `glyphs[i]`.
    #[must_use]
    pub fn with_species_glyphs(mut self, glyphs: Vec<char>) -> Self {
        self.species = glyphs;
        self
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn glyph(&self, cell: &Cell) -> char {
        if !cell.alive {
            return self.dead;
        }
        cell.species
            .and_then(|s| self.species.get(s.index()).copied())
            .unwrap_or(self.alive)
    }
}

impl<W: Write> GenerationSink<Grid1D> for TextSink<W> {
    fn emit(&mut self, _generation: GenerationId, grid: &Grid1D) -> io::Result<()> {
        let line = encode_line(grid, |c| self.glyph(c));
        writeln!(self.out, "{line}")
    }
}

impl<W: Write> GenerationSink<Grid2D> for TextSink<W> {
    fn emit(&mut self, _generation: GenerationId, grid: &Grid2D) -> io::Result<()> {
        let rows = encode_rows(grid, |c| self.glyph(c));
        write!(self.out, "{rows}")?;
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellum_core::SpeciesId;

    #[test]
    fn text_sink_1d() {
        let mut sink = TextSink::new(Vec::new());
        let g = Grid1D::from_states([true, false, true]).unwrap();
        sink.emit(GenerationId(0), &g).unwrap();
        sink.emit(GenerationId(1), &g).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "# #\n# #\n");
    }

    #[test]
    fn text_sink_species_glyphs() {
        let mut sink = TextSink::new(Vec::new())
            .with_glyphs('-', 'X')
            .with_species_glyphs(vec!['1', '2']);
        let g = Grid1D::from_cells(vec![
            Cell::with_species(true, SpeciesId(1)),
            Cell::with_species(false, SpeciesId(0)),
            Cell::with_species(true, SpeciesId(0)),
            Cell::with_species(true, SpeciesId(9)),
            Cell::ALIVE,
        ])
        .unwrap();
        sink.emit(GenerationId(0), &g).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "2-1XX\n");
    }

    #[test]
    fn text_sink_2d_separates_generations() {
        let mut sink = TextSink::new(Vec::new()).with_glyphs('.', 'O');
        let g = Grid2D::from_rows(vec![
            vec![Cell::ALIVE, Cell::DEAD],
            vec![Cell::DEAD, Cell::ALIVE],
        ])
        .unwrap();
        sink.emit(GenerationId(0), &g).unwrap();
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "O.\n.O\n\n"
        );
    }

    #[test]
    fn collect_sink_keeps_order() {
        let mut sink = CollectSink::new();
        let g = Grid1D::point(3).unwrap();
        sink.emit(GenerationId(0), &g).unwrap();
        sink.emit(GenerationId(1), &g).unwrap();
        let ids: Vec<u64> = sink.generations.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(sink.grids().count(), 2);
    }

    #[test]
    fn null_sink_accepts_anything() {
        let g = Grid1D::point(3).unwrap();
        assert!(GenerationSink::<Grid1D>::emit(&mut NullSink, GenerationId(0), &g).is_ok());
    }
}
