// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, kwg};

struct MyHasher(u64);

impl std::hash::Hasher for MyHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }
}

impl Default for MyHasher {
    fn default() -> MyHasher {
        MyHasher(0)
    }
}

type MyHasherDefault = std::hash::BuildHasherDefault<MyHasher>;

// Unconfirmed entries, one per tile of the words currently on the stack.
struct Transition {
    tile: u8,
    accepts: bool,
    arc_index: u32, // Refers to states.
}

struct TransitionStack<'a> {
    transitions: &'a mut Vec<Transition>,
    indexes: &'a mut Vec<usize>,
}

impl TransitionStack<'_> {
    fn push(&mut self, tile: u8) {
        self.transitions.push(Transition {
            tile,
            accepts: false,
            arc_index: 0, // Filled up later.
        });
        self.indexes.push(self.transitions.len());
    }

    fn pop(&mut self, state_maker: &mut StateMaker) {
        if let Some(start_of_batch) = self.indexes.pop() {
            let new_arc_index = state_maker.make_state(&self.transitions[start_of_batch..]);
            self.transitions[start_of_batch - 1].arc_index = new_arc_index;
            self.transitions.truncate(start_of_batch);
        }
    }
}

// Deduplicated entries. A state is a sibling list linked through next_index.
#[derive(Clone, Eq, Hash, PartialEq)]
struct State {
    tile: u8,
    accepts: bool,
    arc_index: u32,  // Refers to states.
    next_index: u32, // Refers to states.
}

struct StateMaker<'a> {
    states: &'a mut Vec<State>,
    states_finder: &'a mut std::collections::HashMap<State, u32, MyHasherDefault>,
}

impl StateMaker<'_> {
    fn make_state(&mut self, node_transitions: &[Transition]) -> u32 {
        let mut ret = 0;
        for node_transition in node_transitions.iter().rev() {
            let state = State {
                tile: node_transition.tile,
                accepts: node_transition.accepts,
                arc_index: node_transition.arc_index,
                next_index: ret,
            };
            use std::collections::hash_map::Entry::{Occupied, Vacant};
            match self.states_finder.entry(state) {
                Occupied(entry) => {
                    ret = *entry.get();
                }
                Vacant(entry) => {
                    ret = self.states.len() as u32;
                    self.states.push(entry.key().clone());
                    entry.insert(ret);
                }
            }
        }
        ret
    }

    // sorted_machine_words must be sorted and deduplicated.
    fn make_dawg(&mut self, sorted_machine_words: &[Box<[u8]>]) -> u32 {
        let mut transition_stack = TransitionStack {
            transitions: &mut Vec::new(),
            indexes: &mut Vec::new(),
        };
        let mut prev_word: &[u8] = &[];
        for this_word in sorted_machine_words {
            let prefix_len = prev_word
                .iter()
                .zip(this_word.iter())
                .take_while(|(a, b)| a == b)
                .count();
            for _ in prefix_len..prev_word.len() {
                transition_stack.pop(self);
            }
            for &tile in &this_word[prefix_len..] {
                transition_stack.push(tile);
            }
            let transitions_len = transition_stack.transitions.len();
            transition_stack.transitions[transitions_len - 1].accepts = true;
            prev_word = this_word;
        }
        for _ in 0..transition_stack.indexes.len() {
            transition_stack.pop(self);
        }
        self.make_state(&transition_stack.transitions[..])
    }
}

// zero-cost type-safety
struct IsEnd(bool);
struct Accepts(bool);

struct StatesDefragger<'a> {
    states: &'a [State],
    prev_indexes: &'a [u32],
    destination: &'a mut Vec<u32>,
    num_written: u32,
}

impl StatesDefragger<'_> {
    // lays out the sibling list containing p contiguously, children first.
    fn defrag(&mut self, mut p: u32) {
        loop {
            let prev = self.prev_indexes[p as usize];
            if prev == 0 {
                break;
            }
            p = prev;
        }
        if self.destination[p as usize] != 0 {
            return;
        }
        // temp value to break self-cycles.
        self.destination[p as usize] = !0;
        let mut write_p = p;
        let mut num = 0u32;
        loop {
            num += 1;
            let a = self.states[p as usize].arc_index;
            if a != 0 {
                self.defrag(a);
            }
            p = self.states[p as usize].next_index;
            if p == 0 {
                break;
            }
        }
        for ofs in 0..num {
            self.destination[write_p as usize] = self.num_written + ofs;
            write_p = self.states[write_p as usize].next_index;
        }
        // Tails shared by different heads get duplicated, so always += num.
        self.num_written += num;
    }

    fn write_node(
        &self,
        out: &mut [u8],
        arc_index: u32,
        is_end: IsEnd,
        accepts: Accepts,
        tile: u8,
    ) {
        let defragged_arc_index = self.destination[arc_index as usize];
        out[0] = defragged_arc_index as u8;
        out[1] = (defragged_arc_index >> 8) as u8;
        out[2] = ((defragged_arc_index >> 16) & 0x3f
            | if is_end.0 { 0x40 } else { 0 }
            | if accepts.0 { 0x80 } else { 0 }) as u8;
        out[3] = tile;
    }

    fn to_vec(&self, dawg_start_state: u32) -> Vec<u8> {
        let mut ret = vec![0; (self.num_written as usize) << 2];
        self.write_node(
            &mut ret[0..],
            dawg_start_state,
            IsEnd(true),
            Accepts(false),
            0,
        );
        for mut p in 1..self.states.len() {
            if self.prev_indexes[p] != 0 {
                continue;
            }
            let mut dp = self.destination[p] as usize;
            if dp == 0 {
                continue;
            }
            dp <<= 2;
            loop {
                let np = self.states[p].next_index;
                self.write_node(
                    &mut ret[dp..],
                    self.states[p].arc_index,
                    IsEnd(np == 0),
                    Accepts(self.states[p].accepts),
                    self.states[p].tile,
                );
                if np == 0 {
                    break;
                }
                p = np as usize;
                dp += 4;
            }
        }
        ret
    }
}

fn gen_prev_indexes(states: &[State]) -> Vec<u32> {
    let states_len = states.len();
    let mut prev_indexes = vec![0u32; states_len];
    for p in (1..states_len).rev() {
        prev_indexes[states[p].next_index as usize] = p as u32;
    }
    // prev_indexes[0] is garbage, does not matter.

    prev_indexes
}

// Builds the packed node array for a dawg. Node 0 points to the first edge.
// Words are tile sequences, they need not be sorted or unique.
pub fn build_dawg(machine_words: &[Box<[u8]>]) -> error::Returns<Vec<u8>> {
    let mut sorted_machine_words = machine_words
        .iter()
        .filter(|word| !word.is_empty())
        .cloned()
        .collect::<Vec<_>>();
    sorted_machine_words.sort_unstable();
    sorted_machine_words.dedup();

    // The sink state always exists.
    let mut states = vec![State {
        tile: 0,
        accepts: false,
        arc_index: 0,
        next_index: 0,
    }];

    let mut states_finder = std::collections::HashMap::<_, _, MyHasherDefault>::default();
    states_finder.insert(states[0].clone(), 0);

    let mut state_maker = StateMaker {
        states: &mut states,
        states_finder: &mut states_finder,
    };
    let dawg_start_state = state_maker.make_dawg(&sorted_machine_words);

    let mut states_defragger = StatesDefragger {
        states: &states,
        prev_indexes: &gen_prev_indexes(&states),
        destination: &mut vec![0u32; states.len()],
        num_written: 1, // Convention: [0] points to the dawg.
    };
    states_defragger.destination[0] = !0; // useful for empty lexicon
    if dawg_start_state != 0 {
        states_defragger.defrag(dawg_start_state);
    }
    states_defragger.destination[0] = 0; // useful for empty lexicon

    if states_defragger.num_written > 0x400000 {
        // the format can only have 0x400000 elements, each has 4 bytes
        return_error!(format!(
            "this format cannot have {} nodes",
            states_defragger.num_written
        ));
    }

    Ok(states_defragger.to_vec(dawg_start_state))
}

pub fn build_kwg(machine_words: &[Box<[u8]>]) -> error::Returns<kwg::Kwg> {
    Ok(kwg::Kwg::from_bytes_alloc(&build_dawg(machine_words)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(v: &[&[u8]]) -> Vec<Box<[u8]>> {
        v.iter().map(|w| Box::<[u8]>::from(*w)).collect()
    }

    fn all_words(kwg: &kwg::Kwg) -> Vec<Vec<u8>> {
        let mut v = Vec::new();
        kwg.for_each_word(|w| v.push(w.to_vec()));
        v
    }

    #[test]
    fn empty_lexicon_builds_empty_graph() {
        let kwg = build_kwg(&[]).unwrap();
        assert!(kwg.is_empty());
        assert_eq!(kwg.len(), 1);
    }

    #[test]
    fn round_trips_words_in_sorted_order() {
        let kwg = build_kwg(&words(&[&[3, 1, 20, 19], &[1, 20], &[3, 1, 20], &[1, 20]])).unwrap();
        assert_eq!(
            all_words(&kwg),
            vec![vec![1, 20], vec![3, 1, 20], vec![3, 1, 20, 19]]
        );
    }

    #[test]
    fn shares_common_suffixes() {
        // BAKE CAKE FAKE LAKE MAKE share the AKE tail.
        let list = words(&[
            &[2, 1, 11, 5],
            &[3, 1, 11, 5],
            &[6, 1, 11, 5],
            &[12, 1, 11, 5],
            &[13, 1, 11, 5],
        ]);
        let kwg = build_kwg(&list).unwrap();
        assert_eq!(all_words(&kwg).len(), 5);
        // root + 5 first letters + A + K + E
        assert_eq!(kwg.len(), 9);
    }
}
