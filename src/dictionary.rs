// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, build, error, kwg};

pub use kwg::Edge;

// Read-only view of a dawg. Edges are opaque handles; a parent's children are
// a sibling list reached through follow().
pub trait DictionaryView {
    fn top_edge(&self) -> Option<Edge>;
    fn follow(&self, edge: Edge) -> Option<Edge>;
    fn next_sibling(&self, edge: Edge) -> Option<Edge>;
    fn edge_tile(&self, edge: Edge) -> u8;
    fn is_accepting(&self, edge: Edge) -> bool;
    fn tile_value(&self, tile: u8) -> i16;
    fn blank_tile(&self) -> u8;
    fn num_faces(&self) -> u8;

    #[inline(always)]
    fn is_last_edge(&self, edge: Edge) -> bool {
        self.next_sibling(edge).is_none()
    }

    // the sibling of edge (inclusive) carrying tile.
    fn edge_with_tile(&self, edge: Option<Edge>, tile: u8) -> Option<Edge> {
        let mut e = edge?;
        loop {
            if self.edge_tile(e) == tile {
                return Some(e);
            }
            e = self.next_sibling(e)?;
        }
    }

    // descends through tile from the sibling list starting at edge.
    #[inline(always)]
    fn edge_from_tile(&self, edge: Option<Edge>, tile: u8) -> Option<Edge> {
        self.follow(self.edge_with_tile(edge, tile)?)
    }

    // true iff the path spelled by tiles from the sibling list at edge ends on
    // an accepting edge.
    fn lookup(&self, edge: Option<Edge>, tiles: &[u8]) -> bool {
        let Some((&last, init)) = tiles.split_last() else {
            return false;
        };
        let mut e = edge;
        for &tile in init {
            e = self.edge_from_tile(e, tile);
            if e.is_none() {
                return false;
            }
        }
        self.edge_with_tile(e, last)
            .is_some_and(|e| self.is_accepting(e))
    }

    #[inline(always)]
    fn check_word(&self, tiles: &[u8]) -> bool {
        self.lookup(self.top_edge(), tiles)
    }
}

pub struct Dictionary<'a> {
    kwg: kwg::Kwg,
    alphabet: &'a alphabet::Alphabet<'a>,
}

impl<'a> Dictionary<'a> {
    pub fn new(kwg: kwg::Kwg, alphabet: &'a alphabet::Alphabet<'a>) -> error::Returns<Self> {
        if alphabet.len() > 64 {
            return_error!(format!(
                "alphabet has {} faces, at most 64 are supported",
                alphabet.len()
            ));
        }
        Ok(Self { kwg, alphabet })
    }

    pub fn from_bytes(buf: &[u8], alphabet: &'a alphabet::Alphabet<'a>) -> error::Returns<Self> {
        Self::new(kwg::Kwg::from_bytes_alloc(buf), alphabet)
    }

    pub fn from_words<S: AsRef<str>>(
        alphabet: &'a alphabet::Alphabet<'a>,
        words: &[S],
    ) -> error::Returns<Self> {
        let mut machine_words = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            machine_words.push(alphabet.word_from_str(word)?.into_boxed_slice());
        }
        Self::new(build::build_kwg(&machine_words)?, alphabet)
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &'a alphabet::Alphabet<'a> {
        self.alphabet
    }

    #[inline(always)]
    pub fn kwg(&self) -> &kwg::Kwg {
        &self.kwg
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.kwg.is_empty()
    }
}

impl DictionaryView for Dictionary<'_> {
    #[inline(always)]
    fn top_edge(&self) -> Option<Edge> {
        self.kwg.top_edge()
    }

    #[inline(always)]
    fn follow(&self, edge: Edge) -> Option<Edge> {
        self.kwg.follow(edge)
    }

    #[inline(always)]
    fn next_sibling(&self, edge: Edge) -> Option<Edge> {
        self.kwg.next_sibling(edge)
    }

    #[inline(always)]
    fn edge_with_tile(&self, edge: Option<Edge>, tile: u8) -> Option<Edge> {
        self.kwg.seek(edge?, tile)
    }

    #[inline(always)]
    fn edge_tile(&self, edge: Edge) -> u8 {
        self.kwg[edge].tile()
    }

    #[inline(always)]
    fn is_accepting(&self, edge: Edge) -> bool {
        self.kwg[edge].accepts()
    }

    #[inline(always)]
    fn tile_value(&self, tile: u8) -> i16 {
        self.alphabet.score(tile) as i16
    }

    #[inline(always)]
    fn blank_tile(&self) -> u8 {
        self.alphabet.blank_tile()
    }

    #[inline(always)]
    fn num_faces(&self) -> u8 {
        self.alphabet.len()
    }
}
