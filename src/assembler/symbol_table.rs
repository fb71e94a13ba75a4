//! Symbol table management for labels and `define` variables

/// A label and its byte offset from the start of the program.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,

    /// Offset from the entry point; zero until the sizing pass runs
    pub offset: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// A `define NAME VALUE` substitution rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub defined_at: usize,
}

/// Symbol table for managing label definitions and variables
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    labels: Vec<Label>,
    variables: Vec<Variable>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label with an unresolved offset
    ///
    /// Returns Err with the existing label if the name is already taken
    pub fn add_label(&mut self, name: String, defined_at: usize) -> Result<(), Label> {
        if let Some(existing) = self.lookup_label(&name) {
            return Err(existing.clone());
        }

        self.labels.push(Label {
            name,
            offset: 0,
            defined_at,
        });

        Ok(())
    }

    /// Look up a label by name
    pub fn lookup_label(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }

    /// Record the byte offset of a label. Unknown names are ignored.
    pub fn set_label_offset(&mut self, name: &str, offset: u16) {
        if let Some(label) = self.labels.iter_mut().find(|l| l.name == name) {
            label.offset = offset;
        }
    }

    /// Add a substitution rule
    ///
    /// Returns Err with the existing variable if the name is already taken
    pub fn add_variable(
        &mut self,
        name: String,
        value: String,
        defined_at: usize,
    ) -> Result<(), Variable> {
        if let Some(existing) = self.variables.iter().find(|v| v.name == name) {
            return Err(existing.clone());
        }

        self.variables.push(Variable {
            name,
            value,
            defined_at,
        });

        Ok(())
    }

    /// All labels, ordered by definition line
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Orders labels and variables by source line.
    pub(crate) fn sort_by_line(&mut self) {
        self.labels.sort_by_key(|l| l.defined_at);
        self.variables.sort_by_key(|v| v.defined_at);
    }
}
