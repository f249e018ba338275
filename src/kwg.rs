// Copyright (C) 2020-2024 Andy Kurnia.

// Packed node layout, little endian:
// bits 0-21 = arc index (first child), 0 if none
// bit 22 = last sibling
// bit 23 = accepts
// bits 24-31 = tile
#[derive(Clone, Copy)]
pub struct Node(u32);

impl Node {
    #[inline(always)]
    pub fn tile(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.0 & 0x800000 != 0
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.0 & 0x400000 != 0
    }

    #[inline(always)]
    pub fn arc_index(&self) -> u32 {
        self.0 & 0x3fffff
    }
}

// Index of a node in the arena. Index 0 is the root pointer and is never an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(u32);

impl Edge {
    #[inline(always)]
    fn from_arc_index(arc_index: u32) -> Option<Edge> {
        if arc_index == 0 {
            None
        } else {
            Some(Edge(arc_index))
        }
    }

    #[inline(always)]
    pub fn index(&self) -> u32 {
        self.0
    }
}

pub struct Kwg(Box<[Node]>);

pub static EMPTY_KWG_BYTES: &[u8] = b"\x00\x00\x40\x00";

impl std::ops::Index<Edge> for Kwg {
    type Output = Node;

    #[inline(always)]
    fn index(&self, e: Edge) -> &Node {
        &self.0[e.0 as usize]
    }
}

impl Kwg {
    pub fn from_bytes_alloc(buf: &[u8]) -> Kwg {
        let kwg_len = buf.len() / 4;
        let mut elts = Vec::with_capacity(kwg_len.max(1));
        let mut r = 0;
        for _ in 0..kwg_len {
            elts.push(Node(
                buf[r] as u32
                    | (buf[r + 1] as u32) << 8
                    | (buf[r + 2] as u32) << 16
                    | (buf[r + 3] as u32) << 24,
            ));
            r += 4;
        }
        if elts.is_empty() {
            // a missing root means an empty lexicon.
            elts.push(Node(0x400000));
        }
        Kwg(elts.into_boxed_slice())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.top_edge().is_none()
    }

    #[inline(always)]
    pub fn top_edge(&self) -> Option<Edge> {
        Edge::from_arc_index(self.0[0].arc_index())
    }

    #[inline(always)]
    pub fn follow(&self, e: Edge) -> Option<Edge> {
        Edge::from_arc_index(self[e].arc_index())
    }

    #[inline(always)]
    pub fn next_sibling(&self, e: Edge) -> Option<Edge> {
        if self[e].is_end() {
            None
        } else {
            Some(Edge(e.0 + 1))
        }
    }

    #[inline(always)]
    pub fn seek(&self, mut e: Edge, tile: u8) -> Option<Edge> {
        loop {
            let node = self[e];
            if node.tile() == tile {
                return Some(e);
            }
            if node.is_end() {
                return None;
            }
            e = Edge(e.0 + 1);
        }
    }

    // calls out(word) for every accepted word, in graph order.
    pub fn for_each_word<F: FnMut(&[u8])>(&self, mut out: F) {
        fn iter<F: FnMut(&[u8])>(kwg: &Kwg, buf: &mut Vec<u8>, mut e: Edge, out: &mut F) {
            loop {
                let node = kwg[e];
                buf.push(node.tile());
                if node.accepts() {
                    out(&buf[..]);
                }
                if let Some(child) = kwg.follow(e) {
                    iter(kwg, buf, child, out);
                }
                buf.pop();
                match kwg.next_sibling(e) {
                    Some(next) => e = next,
                    None => break,
                }
            }
        }
        if let Some(top) = self.top_edge() {
            iter(self, &mut Vec::new(), top, &mut out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root -> [A(accepts, end) -> [T(accepts, end)]]
    fn tiny() -> Kwg {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(1u32 | 0x400000).to_le_bytes());
        bytes.extend_from_slice(&(2u32 | 0x400000 | 0x800000 | (1 << 24)).to_le_bytes());
        bytes.extend_from_slice(&(0x400000u32 | 0x800000 | (20 << 24)).to_le_bytes());
        Kwg::from_bytes_alloc(&bytes)
    }

    #[test]
    fn empty_kwg_has_no_top_edge() {
        assert!(Kwg::from_bytes_alloc(EMPTY_KWG_BYTES).is_empty());
        assert!(Kwg::from_bytes_alloc(&[]).is_empty());
    }

    #[test]
    fn walks_tiny_graph() {
        let kwg = tiny();
        let a = kwg.top_edge().unwrap();
        assert_eq!(kwg[a].tile(), 1);
        assert!(kwg[a].accepts());
        assert!(kwg.next_sibling(a).is_none());
        assert!(kwg.seek(a, 2).is_none());
        let t = kwg.seek(kwg.follow(a).unwrap(), 20).unwrap();
        assert!(kwg[t].accepts());
        assert!(kwg.follow(t).is_none());
        let mut words = Vec::new();
        kwg.for_each_word(|w| words.push(w.to_vec()));
        assert_eq!(words, vec![vec![1], vec![1, 20]]);
    }
}
