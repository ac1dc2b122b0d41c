use crate::{ChildListType, Trie, TrieNode};

use super::{Visitable, Visitor};
use std::{
    fmt::Display,
    io::{self, Write},
};

/// Settings which change the output of the [`DotPrinter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DotPrinterSettings {
    /// Print the bytes of each prefix as text, escaping anything that is not
    /// printable ASCII, instead of as a list of numbers.
    pub display_prefix_as_text: bool,
}

/// A visitor of the trie that will print the trie in "dot" notation.
///
/// See ['DOT Language | Graphviz'](https://graphviz.org/doc/info/lang.html) for
/// information about syntax and example of the language.
pub struct DotPrinter<O: Write> {
    output: O,
    next_id: usize,
    settings: DotPrinterSettings,
}

impl<O: Write> DotPrinter<O> {
    /// Write the dot-format of the given trie to the given output.
    pub fn print<T: Display>(
        output: O,
        trie: &Trie<T>,
        settings: DotPrinterSettings,
    ) -> io::Result<()> {
        Self::print_tree(output, trie.root(), settings)
    }

    /// Write the dot-format of the trie below `root` to the given output.
    pub fn print_tree<T: Display>(
        output: O,
        root: Option<&TrieNode<T>>,
        settings: DotPrinterSettings,
    ) -> io::Result<()> {
        let mut visitor = DotPrinter {
            output,
            next_id: 0,
            settings,
        };

        visitor.output_prelude()?;
        if let Some(root) = root {
            let _ = root.visit_with(&mut visitor)?;
        }
        visitor.output_epilogue()
    }

    fn output_prelude(&mut self) -> io::Result<()> {
        writeln!(self.output, "strict digraph G {{")?;
        writeln!(self.output, "node [shape=record]")
    }

    fn output_epilogue(&mut self) -> io::Result<()> {
        writeln!(self.output, "}}")
    }

    fn get_id(&mut self) -> usize {
        let new_id = self.next_id;
        self.next_id += 1;
        new_id
    }

    fn write_prefix(&mut self, prefix: &[u8]) -> io::Result<()> {
        if self.settings.display_prefix_as_text {
            // record labels treat these as field separators
            for byte in prefix.escape_ascii() {
                if matches!(byte, b'{' | b'}' | b'|' | b'<' | b'>' | b'"') {
                    write!(self.output, "\\")?;
                }
                self.output.write_all(&[byte])?;
            }
            Ok(())
        } else {
            write!(self.output, "{prefix:?}")
        }
    }
}

impl<T: Display, O: Write> Visitor<T> for DotPrinter<O> {
    type Output = io::Result<usize>;

    fn default_output(&self) -> Self::Output {
        unimplemented!("this visitor should never use the default output")
    }

    fn combine_output(&self, _: Self::Output, _: Self::Output) -> Self::Output {
        unimplemented!("this visitor should never combine outputs")
    }

    fn visit_node(&mut self, t: &TrieNode<T>) -> Self::Output {
        let node_id = self.get_id();
        let children = t.children().sorted();
        let list_type = match t.children().list_type() {
            ChildListType::Sparse => "sparse",
            ChildListType::Dense => "dense",
        };

        write!(self.output, "n{node_id} ")?;
        write!(self.output, "[label=\"{{")?;
        // write header line
        write!(self.output, "{{<h0> {list_type} | {} | ", t.prefix().len())?;
        self.write_prefix(t.prefix())?;
        write!(self.output, "}}")?;
        if let Some(item) = t.item() {
            write!(self.output, " | {item}")?;
        }
        // write child line
        if !children.is_empty() {
            write!(self.output, " | {{")?;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    write!(self.output, " | ")?;
                }
                write!(self.output, "<c{idx}> {}", child.key_byte())?;
            }
            write!(self.output, "}}")?;
        }
        writeln!(self.output, "}}\"]")?;

        // write all the edges
        for (idx, child) in children.into_iter().enumerate() {
            let child_id = child.visit_with(self)?;

            writeln!(self.output, "n{node_id}:c{idx} -> n{child_id}:h0")?;
        }

        Ok(node_id)
    }
}
