//! Program index: every package of one analysis session.

use crate::checker::{PackageInput, TypeTable};
use crate::config::Settings;
use crate::error::{AsterError, AsterResult};
use crate::facade::Facade;
use crate::package::{PackageInfo, facade_matches};
use crate::syntax::SyntaxArena;
use crate::types::{DeclKindSet, NodeId, PackageId, TypeId, TypeKindSet};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Checker output for a whole session.
#[derive(Debug)]
pub struct ProgramInput {
    pub arena: SyntaxArena,
    pub types: TypeTable,
    pub packages: Vec<PackageInput>,
    /// Import paths of the packages analysis was requested for.
    pub initial: Vec<String>,
}

/// Owner of the syntax arena, the type table and all package indexes.
#[derive(Debug)]
pub struct Program {
    arena: SyntaxArena,
    types: Arc<TypeTable>,
    packages: Vec<PackageInfo>,
    initial: Vec<PackageId>,
    settings: Settings,
}

impl Program {
    /// Builds and classifies every package with default settings.
    pub fn load(input: ProgramInput) -> AsterResult<Self> {
        Self::load_with_settings(input, Settings::default())
    }

    pub fn load_with_settings(input: ProgramInput, settings: Settings) -> AsterResult<Self> {
        settings.validate()?;

        let ProgramInput {
            mut arena,
            types,
            packages: inputs,
            initial: initial_paths,
        } = input;

        let mut seen = HashSet::new();
        for package in &inputs {
            if !seen.insert(package.path.as_str()) {
                return Err(AsterError::DuplicatePackage {
                    path: package.path.clone(),
                });
            }
        }

        let initial = initial_paths
            .iter()
            .map(|path| {
                inputs
                    .iter()
                    .position(|p| &p.path == path)
                    .map(PackageId::from_index)
                    .ok_or_else(|| AsterError::PackageNotFound { path: path.clone() })
            })
            .collect::<AsterResult<Vec<_>>>()?;

        let types = Arc::new(types);
        let mut packages = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.into_iter().enumerate() {
            let id = PackageId::from_index(index);
            let mut package = PackageInfo::new(id, input, Arc::clone(&types));
            package.check(&mut arena);
            packages.push(package);
        }

        info!(
            packages = packages.len(),
            initial = initial.len(),
            "program loaded"
        );

        Ok(Self {
            arena,
            types,
            packages,
            initial,
            settings,
        })
    }

    pub fn arena(&self) -> &SyntaxArena {
        &self.arena
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn package(&self, path: &str) -> Option<&PackageInfo> {
        self.packages.iter().find(|p| p.path() == path)
    }

    pub fn package_by_id(&self, id: PackageId) -> Option<&PackageInfo> {
        self.packages.get(id.index())
    }

    /// A package together with the arena, for adding or removing facades.
    pub fn package_mut(&mut self, path: &str) -> Option<(&mut PackageInfo, &mut SyntaxArena)> {
        let package = self.packages.iter_mut().find(|p| p.path() == path)?;
        Some((package, &mut self.arena))
    }

    /// Packages analysis was requested for, in request order.
    pub fn initial_packages(&self) -> impl Iterator<Item = &PackageInfo> {
        self.initial
            .iter()
            .filter_map(|id| self.packages.get(id.index()))
    }

    /// Initial packages and everything they pulled in.
    pub fn all_packages(&self) -> &[PackageInfo] {
        &self.packages
    }

    /// Visits the facades of the initial packages until `visit` returns
    /// false.
    pub fn inspect<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Facade) -> bool,
    {
        for package in self.initial_packages() {
            for facade in package.facades() {
                if !visit(facade) {
                    return;
                }
            }
        }
    }

    /// Facades of the initial packages matching all filters. Empty masks
    /// and an empty name match anything.
    pub fn lookup(
        &self,
        decl_kinds: DeclKindSet,
        type_kinds: TypeKindSet,
        name: &str,
    ) -> Vec<&Facade> {
        let mut found = Vec::new();
        self.inspect(|facade| {
            if facade_matches(facade, decl_kinds, type_kinds, name) {
                found.push(facade);
            }
            true
        });
        found
    }

    /// Searches every loaded package, initial or not.
    pub fn find_facade(&self, ty: TypeId) -> Option<&Facade> {
        self.packages.iter().find_map(|p| p.find_facade(ty))
    }

    /// Facade declared by `ident` in any package.
    pub fn facade(&self, ident: NodeId) -> Option<&Facade> {
        self.packages.iter().find_map(|p| p.facade(ident))
    }

    /// A facade together with the arena, for edits through its type node.
    pub fn facade_mut(&mut self, ident: NodeId) -> Option<(&mut Facade, &mut SyntaxArena)> {
        let facade = self
            .packages
            .iter_mut()
            .find_map(|p| p.facade_mut(ident))?;
        Some((facade, &mut self.arena))
    }

    /// Preview of the declaration around `ident`, rendered by the package
    /// whose files contain it.
    pub fn preview(&self, ident: NodeId) -> String {
        let (start, end) = (self.arena.pos(ident), self.arena.end(ident));
        let package = self.packages.iter().find(|p| {
            !p.path_enclosing_interval(&self.arena, start, end)
                .0
                .is_empty()
        });
        match package {
            Some(package) => package.preview(&self.arena, &self.settings.preview, ident),
            None => {
                let name = self.arena.ident_name(ident).unwrap_or_default();
                format!("{} {name}", self.settings.preview.unpreviewable_prefix)
            }
        }
    }
}
