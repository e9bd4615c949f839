use crate::LetterSet;
use std::collections::VecDeque;
use std::fmt;

pub(crate) type NodeId = usize;
pub(crate) type EdgeId = usize;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Role {
    Source,
    Sink,
    Die,
    Letter,
}

struct Node {
    role: Role,
    letters: LetterSet,
    // Outgoing edge ids, forward and reverse arcs alike.
    adj: Vec<EdgeId>,
}

// One directed arc of a forward/reverse pair. `capacity` is the residual
// capacity: 1 while the arc can still carry a unit of flow, 0 once it has.
// An arc carries flow iff its capacity is 0, equivalently iff its paired
// reverse capacity is 1.
struct Edge {
    from: NodeId,
    to: NodeId,
    rev: EdgeId,
    capacity: u8,
}

const SOURCE: NodeId = 0;

// Residual flow network for one dice inventory. The source and die nodes are
// permanent; letter and sink nodes are attached for a single word and torn
// back down afterwards, restoring the die side to its pristine state so
// words are evaluated independently.
//
// Node ids are arena indices: source at 0, dice at 1..=n (id - 1 is the
// 0-based inventory index), letter nodes contiguous above the dice, sink
// last. Edges live in a parallel arena with the permanent source->die pairs
// as a prefix.
pub(crate) struct FlowNetwork {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    // Boundary between the permanent source+die prefix and the per-word
    // letter/sink suffix of the node arena.
    permanent_nodes: usize,
}

impl FlowNetwork {
    pub fn new() -> FlowNetwork {
        FlowNetwork {
            nodes: vec![Node {
                role: Role::Source,
                letters: LetterSet::EMPTY,
                adj: Vec::new(),
            }],
            edges: Vec::new(),
            permanent_nodes: 1,
        }
    }

    pub fn num_dice(&self) -> usize {
        // Everything permanent except the source is a die node.
        self.permanent_nodes - 1
    }

    fn add_node(&mut self, role: Role, letters: LetterSet) -> NodeId {
        self.nodes.push(Node {
            role,
            letters,
            adj: Vec::new(),
        });
        self.nodes.len() - 1
    }

    // Creates a capacity-1 arc from->to together with its capacity-0 reverse.
    fn link(&mut self, from: NodeId, to: NodeId) {
        let forward = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            rev: forward + 1,
            capacity: 1,
        });
        self.edges.push(Edge {
            from: to,
            to: from,
            rev: forward,
            capacity: 0,
        });
        self.nodes[from].adj.push(forward);
        self.nodes[to].adj.push(forward + 1);
    }

    // Adds one die node and its source edge. Must not be called once a word
    // is attached; die ids are handed out in call order and stay stable for
    // the life of the network.
    pub fn add_die(&mut self, letters: LetterSet) -> NodeId {
        debug_assert_eq!(self.nodes.len(), self.permanent_nodes);
        let die = self.add_node(Role::Die, letters);
        self.link(SOURCE, die);
        self.permanent_nodes += 1;
        die
    }

    // Attaches the word side: one letter node per position (duplicates stay
    // distinct), a sink, and a letter->sink edge per position. Returns the
    // sink id.
    pub fn begin_word(&mut self, letters: &[LetterSet]) -> NodeId {
        debug_assert_eq!(self.nodes.len(), self.permanent_nodes);
        let first = self.nodes.len();
        for &l in letters {
            self.add_node(Role::Letter, l);
        }
        let sink = self.add_node(Role::Sink, LetterSet::EMPTY);
        for position in first..sink {
            self.link(position, sink);
        }
        sink
    }

    // Creates one die->letter edge per (die, position) pair whose letter sets
    // intersect. The check is set intersection, so a die showing the same
    // letter on several faces still contributes a single edge.
    pub fn connect_dice_to_letters(&mut self) {
        for die in 1..self.permanent_nodes {
            for letter in self.permanent_nodes..self.nodes.len() {
                if self.nodes[letter].role == Role::Letter
                    && self.nodes[die].letters.intersects(self.nodes[letter].letters)
                {
                    self.link(die, letter);
                }
            }
        }
    }

    // Discards the word side and resets every source->die pair to unused.
    pub fn end_word(&mut self) {
        let permanent = self.permanent_nodes;
        self.nodes.truncate(permanent);
        self.edges.truncate((permanent - 1) * 2);
        for node in self.nodes.iter_mut().skip(1) {
            // A die keeps only the reverse arc of its source edge.
            node.adj.truncate(1);
        }
        for (i, edge) in self.edges.iter_mut().enumerate() {
            edge.capacity = if i % 2 == 0 { 1 } else { 0 };
        }
    }

    // Breadth-first search from the source over arcs with residual capacity,
    // stopping at the first arrival at `sink`. Returns the augmenting path as
    // edge ids in source->sink order, or None once the network is saturated.
    // Visited marks and predecessor edges are scratch local to one search.
    pub fn find_augmenting_path(&self, sink: NodeId) -> Option<Vec<EdgeId>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut backedge: Vec<Option<EdgeId>> = vec![None; self.nodes.len()];
        let mut queue = VecDeque::new();
        visited[SOURCE] = true;
        queue.push_back(SOURCE);
        'search: while let Some(current) = queue.pop_front() {
            for &e in &self.nodes[current].adj {
                let next = self.edges[e].to;
                if !visited[next] && self.edges[e].capacity == 1 {
                    visited[next] = true;
                    backedge[next] = Some(e);
                    if next == sink {
                        break 'search;
                    }
                    queue.push_back(next);
                }
            }
        }

        let mut path = Vec::new();
        let mut current = sink;
        while current != SOURCE {
            let e = backedge[current]?;
            path.push(e);
            current = self.edges[e].from;
        }
        path.reverse();
        Some(path)
    }

    // Pushes one unit of flow along an augmenting path: each arc on the path
    // becomes used and its paired reverse becomes usable.
    pub fn push_flow(&mut self, path: &[EdgeId]) {
        for &e in path {
            let rev = self.edges[e].rev;
            self.edges[e].capacity = 0;
            self.edges[rev].capacity = 1;
        }
    }

    // The Edmonds-Karp loop: augment until no path remains. Returns the flow
    // value, which equals the number of letter positions that were matched.
    // Bounded by the word length since every augmentation saturates one
    // letter->sink edge.
    pub fn saturate(&mut self, sink: NodeId) -> usize {
        let mut flow = 0;
        while let Some(path) = self.find_augmenting_path(sink) {
            self.push_flow(&path);
            flow += 1;
        }
        flow
    }

    // Reads the assignment back out of the residual state. The word is
    // spellable iff every letter->sink edge is saturated; the die feeding a
    // letter position is the target of the position's one usable reverse arc
    // back into the die side.
    pub fn assignment(&self, sink: NodeId) -> Option<Vec<usize>> {
        let mut dice = Vec::with_capacity(sink - self.permanent_nodes);
        for letter in self.permanent_nodes..sink {
            let mut assigned = None;
            for &e in &self.nodes[letter].adj {
                let edge = &self.edges[e];
                if edge.to == sink {
                    if edge.capacity != 0 {
                        // No flow reached the sink from this position.
                        return None;
                    }
                } else if edge.capacity == 1 {
                    assigned = Some(edge.to - 1);
                }
            }
            dice.push(assigned?);
        }
        Some(dice)
    }
}

impl fmt::Display for FlowNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, node) in self.nodes.iter().enumerate() {
            match node.role {
                Role::Source => write!(f, "Node {}: SOURCE", id)?,
                Role::Sink => write!(f, "Node {}: SINK", id)?,
                Role::Die | Role::Letter => write!(f, "Node {}: {}", id, node.letters)?,
            }
            write!(f, " Edges to")?;
            for &e in &node.adj {
                write!(f, " {}", self.edges[e].to)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

mod test {
    #[allow(unused_imports)]
    use super::*;
    #[allow(unused_imports)]
    use std::str::FromStr;

    #[allow(dead_code)]
    fn network(dice: &[&str]) -> FlowNetwork {
        let mut n = FlowNetwork::new();
        for d in dice {
            n.add_die(LetterSet::from_str(d).unwrap());
        }
        n
    }

    #[allow(dead_code)]
    fn attach(n: &mut FlowNetwork, word: &str) -> NodeId {
        let letters: Vec<LetterSet> = word.bytes().map(LetterSet::single).collect();
        let sink = n.begin_word(&letters);
        n.connect_dice_to_letters();
        sink
    }

    #[test]
    fn die_ids_map_to_inventory_order() {
        let mut n = FlowNetwork::new();
        assert_eq!(n.add_die(LetterSet::from_str("AB").unwrap()), 1);
        assert_eq!(n.add_die(LetterSet::from_str("CD").unwrap()), 2);
        assert_eq!(n.num_dice(), 2);
    }

    #[test]
    fn augmenting_path_alternates_through_residual_arcs() {
        // Both positions of "AB" only reachable if the second augmentation
        // reroutes the first through the reverse arc of die 1.
        let mut n = network(&["AB", "A"]);
        let sink = attach(&mut n, "AB");
        let first = n.find_augmenting_path(sink).unwrap();
        // Shortest augmenting paths here are source->die->letter->sink.
        assert_eq!(first.len(), 3);
        n.push_flow(&first);
        let second = n.find_augmenting_path(sink).unwrap();
        n.push_flow(&second);
        assert_eq!(n.find_augmenting_path(sink), None);
        assert_eq!(n.assignment(sink), Some(vec![1, 0]));
    }

    #[test]
    fn no_path_once_saturated() {
        let mut n = network(&["AB"]);
        let sink = attach(&mut n, "A");
        assert_eq!(n.saturate(sink), 1);
        assert_eq!(n.find_augmenting_path(sink), None);
    }

    #[test]
    fn no_path_when_no_die_matches() {
        let mut n = network(&["AB"]);
        let sink = attach(&mut n, "Z");
        assert_eq!(n.find_augmenting_path(sink), None);
        assert_eq!(n.assignment(sink), None);
    }

    #[test]
    fn end_word_restores_pristine_die_side() {
        let mut n = network(&["AB", "CD"]);
        let sink = attach(&mut n, "AC");
        assert_eq!(n.saturate(sink), 2);
        n.end_word();

        let sink = attach(&mut n, "CA");
        assert_eq!(n.saturate(sink), 2);
        assert_eq!(n.assignment(sink), Some(vec![1, 0]));
    }

    #[test]
    fn repeated_faces_make_one_edge() {
        let mut n = network(&["AAB"]);
        let sink = attach(&mut n, "AA");
        // Die node 1 has its source reverse arc plus exactly one edge to
        // each matching position.
        assert_eq!(n.saturate(sink), 1);
        assert_eq!(n.assignment(sink), None);
    }

    #[test]
    fn display_dump() {
        let mut n = network(&["AB"]);
        let sink = attach(&mut n, "A");
        assert_eq!(sink, 3);
        let dump = format!("{}", n);
        assert!(dump.starts_with("Node 0: SOURCE Edges to 1\n"));
        assert!(dump.contains("Node 1: AB Edges to 0 2\n"));
        assert!(dump.contains("Node 3: SINK Edges to 2\n"));
    }
}
