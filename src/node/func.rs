use crate::syntax::{NodeKind, SyntaxArena, format_node};
use crate::types::NodeId;

/// One parameter, result or receiver slot of a signature.
///
/// Grouped declarations (`a, b int`) expand to one slot per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncField {
    pub name: Option<String>,
    /// Printed type expression, e.g. `*User` or `...string`.
    pub type_name: String,
}

/// A method or function signature read from syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncNode {
    node: NodeId,
    name: String,
    recv: Option<FuncField>,
    params: Vec<FuncField>,
    results: Vec<FuncField>,
    variadic: bool,
}

impl FuncNode {
    /// Reads a function declaration. The receiver's type name has leading
    /// `*` stripped so it compares against the owning type's name.
    pub fn from_decl(arena: &SyntaxArena, decl: NodeId) -> Option<Self> {
        let NodeKind::FuncDecl(func) = arena.kind(decl) else {
            return None;
        };
        let recv = func
            .recv
            .and_then(|list| expand_fields(arena, list).into_iter().next())
            .map(|mut field| {
                field.type_name = field.type_name.trim_start_matches('*').to_string();
                field
            });
        let mut node = Self::from_signature(arena, decl, arena.ident_name(func.name)?, func.ty)?;
        node.recv = recv;
        Some(node)
    }

    /// Reads a method spec `Name(params) results` declared inside an
    /// interface; the receiver is synthesized as `owner`.
    pub fn from_interface_method(arena: &SyntaxArena, owner: &str, field: NodeId) -> Option<Self> {
        let spec = arena.as_field(field)?;
        let [name] = spec.names.as_slice() else {
            return None;
        };
        let mut node = Self::from_signature(arena, field, arena.ident_name(*name)?, spec.ty)?;
        node.recv = Some(FuncField {
            name: None,
            type_name: owner.to_string(),
        });
        Some(node)
    }

    fn from_signature(
        arena: &SyntaxArena,
        node: NodeId,
        name: &str,
        func_type: NodeId,
    ) -> Option<Self> {
        let NodeKind::FuncType { params, results } = arena.kind(func_type) else {
            return None;
        };
        let params = expand_fields(arena, *params);
        let results = results
            .map(|list| expand_fields(arena, list))
            .unwrap_or_default();
        let variadic = params
            .last()
            .is_some_and(|p| p.type_name.starts_with("..."));
        Some(Self {
            node,
            name: name.to_string(),
            recv: None,
            params,
            results,
            variadic,
        })
    }

    /// Declaring node: a `FuncDecl`, or the `Field` of an interface method.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recv(&self) -> Option<&FuncField> {
        self.recv.as_ref()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn num_param(&self) -> usize {
        self.params.len()
    }

    pub fn param(&self, i: usize) -> Option<&FuncField> {
        self.params.get(i)
    }

    pub fn num_result(&self) -> usize {
        self.results.len()
    }

    pub fn result(&self, i: usize) -> Option<&FuncField> {
        self.results.get(i)
    }

    /// Same arity, variadic-ness and positional type names.
    pub(crate) fn same_signature(&self, other: &FuncNode) -> bool {
        if self.variadic != other.variadic
            || self.params.len() != other.params.len()
            || self.results.len() != other.results.len()
        {
            return false;
        }
        let params = self.params.iter().zip(&other.params);
        let results = self.results.iter().zip(&other.results);
        params
            .chain(results)
            .all(|(a, b)| a.type_name == b.type_name)
    }
}

fn expand_fields(arena: &SyntaxArena, list: NodeId) -> Vec<FuncField> {
    let mut out = Vec::new();
    for id in arena.list_items(list) {
        let Some(field) = arena.as_field(*id) else {
            continue;
        };
        let type_name = format_node(arena, field.ty);
        if field.names.is_empty() {
            out.push(FuncField {
                name: None,
                type_name,
            });
            continue;
        }
        for name in &field.names {
            out.push(FuncField {
                name: arena.ident_name(*name).map(str::to_string),
                type_name: type_name.clone(),
            });
        }
    }
    out
}
