//! Three-address code.
//!
//! The IR is a flat list of quadruples and labels. Temporaries (`t0`, `t1`,
//! ...) and labels (`L0`, `L1`, ...) are numbered by a [`CodegenContext`]
//! owned by whoever drives code generation, so separate compiles never share
//! counters.

use std::fmt::Display;

/// One instruction `op arg1 arg2 result`. Unused fields are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadruple {
    pub op: String,
    pub arg1: String,
    pub arg2: String,
    pub result: String,
}

impl Quadruple {
    pub fn new(op: &str, arg1: &str, arg2: &str, result: &str) -> Self {
        Quadruple {
            op: String::from(op),
            arg1: String::from(arg1),
            arg2: String::from(arg2),
            result: String::from(result),
        }
    }
}

impl Display for Quadruple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.op, self.arg1, self.arg2, self.result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub usize);

impl Label {
    /// The name used as a jump target, e.g. `L3`.
    pub fn name(&self) -> String {
        format!("L{}", self.0)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrEntry {
    Quadruple(Quadruple),
    Label(Label),
}

impl Display for IrEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrEntry::Quadruple(quadruple) => write!(f, "{}", quadruple),
            IrEntry::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Counters for fresh temporaries and labels.
#[derive(Debug, Default)]
pub struct CodegenContext {
    next_temp: usize,
    next_label: usize,
}

impl CodegenContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temp(&mut self) -> String {
        let temp = format!("t{}", self.next_temp);
        self.next_temp += 1;
        temp
    }

    pub fn label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    pub fn temps_used(&self) -> usize {
        self.next_temp
    }

    pub fn labels_used(&self) -> usize {
        self.next_label
    }
}

/// The code emitted for one node and the operand holding its value, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub entries: Vec<IrEntry>,
    pub result: String,
}

impl GeneratedCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code that only names a value, such as a constant or a variable.
    pub fn operand(result: &str) -> Self {
        GeneratedCode {
            entries: vec![],
            result: String::from(result),
        }
    }

    pub fn quad(&mut self, op: &str, arg1: &str, arg2: &str, result: &str) {
        self.entries
            .push(IrEntry::Quadruple(Quadruple::new(op, arg1, arg2, result)));
    }

    pub fn label(&mut self, label: Label) {
        self.entries.push(IrEntry::Label(label));
    }

    /// Appends `other`'s entries and returns its result operand.
    pub fn append(&mut self, other: GeneratedCode) -> String {
        self.entries.extend(other.entries);
        other.result
    }

    pub fn labels(&self) -> Vec<Label> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                IrEntry::Label(label) => Some(*label),
                IrEntry::Quadruple(_) => None,
            })
            .collect()
    }

    /// One entry per line.
    pub fn listing(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}
