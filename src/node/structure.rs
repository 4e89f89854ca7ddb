//! Struct fields and their editable tags.

use crate::error::AsterResult;
use crate::syntax::{CommentGroup, LitKind, NodeKind, SyntaxArena};
use crate::tag::{self, Tag, Tags};
use crate::types::{NodeId, Span};
use std::fmt;
use tracing::warn;

/// Field list of a struct type, one entry per declared name.
#[derive(Debug, Clone)]
pub struct StructType {
    fields: Vec<StructField>,
}

impl StructType {
    /// Flattens the field list under `fields` (a `FieldList` node) and wraps
    /// every field.
    pub(crate) fn new(arena: &mut SyntaxArena, fields: NodeId) -> Self {
        flatten_fields(arena, fields);
        let fields = arena
            .list_items(fields)
            .to_vec()
            .into_iter()
            .map(|field| StructField::new(arena, field))
            .collect();
        Self { fields }
    }

    pub fn num_field(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, i: usize) -> Option<&StructField> {
        self.fields.get(i)
    }

    pub fn field_mut(&mut self, i: usize) -> Option<&mut StructField> {
        self.fields.get_mut(i)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut StructField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }
}

/// Splits grouped declarations (`A, B int`) into one field node per name.
/// Each field gets its own tag literal so the tags can be edited apart; the
/// first field reuses the original node id.
fn flatten_fields(arena: &mut SyntaxArena, list: NodeId) {
    let original = arena.list_items(list).to_vec();
    let mut flat = Vec::with_capacity(original.len());

    for id in original {
        let Some(field) = arena.as_field(id).cloned() else {
            flat.push(id);
            continue;
        };
        if field.names.len() < 2 {
            flat.push(id);
            continue;
        }

        let last = field.names.len() - 1;
        let end = arena.end(id);
        for (i, name) in field.names.iter().enumerate() {
            let span = Span::new(
                arena.pos(*name),
                if i == last { end } else { arena.end(*name) },
            );
            let mut copy = field.clone();
            copy.names = vec![*name];
            // The last field keeps the source literal, earlier ones get
            // position-less copies.
            if i < last {
                copy.tag = field.tag.map(|tag| {
                    let lit = arena.kind(tag).clone();
                    arena.alloc(lit, Span::default())
                });
            }
            if i == 0 {
                *arena.kind_mut(id) = NodeKind::Field(copy);
                arena.set_span(id, span);
                flat.push(id);
            } else {
                flat.push(arena.alloc(NodeKind::Field(copy), span));
            }
        }
    }

    if let NodeKind::FieldList { list } = arena.kind_mut(list) {
        *list = flat;
    }
}

/// A single field of a struct.
#[derive(Debug, Clone)]
pub struct StructField {
    field: NodeId,
    name: String,
    anonymous: bool,
    tags: StructTag,
}

impl StructField {
    fn new(arena: &SyntaxArena, field: NodeId) -> Self {
        let (name, anonymous) = match arena.as_field(field) {
            Some(f) => match f.names.first() {
                Some(ident) => (arena.ident_name(*ident).unwrap_or_default(), false),
                None => (
                    arena
                        .base_ident(f.ty)
                        .and_then(|ident| arena.ident_name(ident))
                        .unwrap_or_default(),
                    true,
                ),
            },
            None => ("", true),
        };
        Self {
            field,
            name: name.to_string(),
            anonymous,
            tags: StructTag::new(arena, field),
        }
    }

    /// The `Field` node.
    pub fn node(&self) -> NodeId {
        self.field
    }

    /// Declared name; for an embedded field the base name of its type, or
    /// an empty string when the type has none.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the field was declared without a name.
    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    /// Lead comment text.
    pub fn doc(&self, arena: &SyntaxArena) -> String {
        arena
            .as_field(self.field)
            .and_then(|f| f.doc.as_ref())
            .map(CommentGroup::text)
            .unwrap_or_default()
    }

    /// Replaces the whole lead comment with `text`.
    pub fn set_doc(&self, arena: &mut SyntaxArena, text: &str) {
        if let Some(f) = arena.as_field_mut(self.field) {
            f.doc = Some(CommentGroup::single(text));
        }
    }

    /// Line comment text.
    pub fn comment(&self, arena: &SyntaxArena) -> String {
        arena
            .as_field(self.field)
            .and_then(|f| f.comment.as_ref())
            .map(CommentGroup::text)
            .unwrap_or_default()
    }

    /// Replaces the whole line comment with `text`.
    pub fn set_comment(&self, arena: &mut SyntaxArena, text: &str) {
        if let Some(f) = arena.as_field_mut(self.field) {
            f.comment = Some(CommentGroup::single(text));
        }
    }

    pub fn tags(&self) -> &StructTag {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut StructTag {
        &mut self.tags
    }
}

/// Parsed tag of one field.
///
/// Every successful edit sorts the tags by key and writes them back into
/// the field's tag literal; an empty set removes the literal.
#[derive(Debug, Clone)]
pub struct StructTag {
    field: NodeId,
    tags: Tags,
}

impl StructTag {
    fn new(arena: &SyntaxArena, field: NodeId) -> Self {
        let mut tag = Self {
            field,
            tags: Tags::new(),
        };
        if let Err(e) = tag.reparse(arena) {
            warn!(field = field.value(), error = %e, "unparsable struct tag, treating as empty");
        }
        tag
    }

    /// Re-reads the field's tag literal. On error the set is left empty
    /// and the error returned.
    pub fn reparse(&mut self, arena: &SyntaxArena) -> AsterResult<()> {
        let raw = arena
            .as_field(self.field)
            .and_then(|f| f.tag)
            .and_then(|lit| match arena.kind(lit) {
                NodeKind::BasicLit { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .unwrap_or_default();

        match tag::literal_content(raw).and_then(|text| Tags::parse(&text)) {
            Ok(tags) => {
                self.tags = tags;
                Ok(())
            }
            Err(e) => {
                self.tags = Tags::new();
                Err(e)
            }
        }
    }

    fn reset_value(&mut self, arena: &mut SyntaxArena) {
        self.tags.sort();
        let text = self.tags.to_string();
        let Some(current) = arena.as_field(self.field).map(|f| f.tag) else {
            return;
        };

        if text.is_empty() {
            if let Some(f) = arena.as_field_mut(self.field) {
                f.tag = None;
            }
            return;
        }

        let value = tag::literal(&text);
        match current {
            Some(lit) => {
                if let NodeKind::BasicLit { value: raw, .. } = arena.kind_mut(lit) {
                    *raw = value;
                }
            }
            None => {
                let lit = arena.alloc(
                    NodeKind::BasicLit {
                        kind: LitKind::String,
                        value,
                    },
                    Span::default(),
                );
                if let Some(f) = arena.as_field_mut(self.field) {
                    f.tag = Some(lit);
                }
            }
        }
    }

    /// Tags in their current order: source order until the first edit,
    /// key order afterwards.
    pub fn tags(&self) -> &[Tag] {
        self.tags.tags()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.tags.keys()
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.get(key)
    }

    /// Upserts `tag`. An invalid tag is rejected and nothing changes.
    pub fn set(&mut self, arena: &mut SyntaxArena, tag: Tag) -> AsterResult<()> {
        self.tags.set(tag)?;
        self.reset_value(arena);
        Ok(())
    }

    /// Adds options to the tag under `key`, skipping existing ones.
    pub fn add_options(&mut self, arena: &mut SyntaxArena, key: &str, options: &[&str]) {
        self.tags.add_options(key, options);
        self.reset_value(arena);
    }

    /// Deletes the tags under `keys`.
    pub fn delete(&mut self, arena: &mut SyntaxArena, keys: &[&str]) {
        self.tags.delete(keys);
        self.reset_value(arena);
    }

    /// Deletes options of the tag under `key`.
    pub fn delete_options(&mut self, arena: &mut SyntaxArena, key: &str, options: &[&str]) {
        self.tags.delete_options(key, options);
        self.reset_value(arena);
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tags)
    }
}
