use std::fmt;

use super::Executable;
use super::ExecutableMeta;
use super::declaration::ApplicationDeclaration;
use super::declaration::ApplicationKind;

/// A registered context-menu application. Always slash-enabled.
#[derive(Debug, Clone)]
pub struct Application {
	meta: ExecutableMeta,
	kind: ApplicationKind,
}

impl Application {
	pub fn new<D: ApplicationDeclaration>(decl: &D) -> Self {
		let mut meta = ExecutableMeta::from_declaration(decl, decl.name().to_string());
		meta.slash.enabled = true;

		Self {
			meta,
			kind: decl.kind(),
		}
	}

	pub fn kind(&self) -> ApplicationKind {
		self.kind
	}
}

impl Executable for Application {
	fn meta(&self) -> &ExecutableMeta {
		&self.meta
	}
}

impl fmt::Display for Application {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.meta.name)
	}
}
