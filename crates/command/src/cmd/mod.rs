mod application;
mod cmd_meta;
mod cmd_trait;
mod command;
pub mod declaration;
mod table;

pub use application::Application;
pub use cmd_meta::Argument;
pub use cmd_meta::DEFAULT_CATEGORY;
pub use cmd_meta::DEFAULT_DESCRIPTION;
pub use cmd_meta::ExecutableMeta;
pub use cmd_meta::SlashOptions;
pub use cmd_meta::usage_of;
pub use cmd_trait::Executable;
pub use command::Command;
pub use declaration::ApplicationDeclaration;
pub use declaration::ApplicationKind;
pub use declaration::CommandDeclaration;
pub use declaration::Declaration;
pub use table::CmdTable;
