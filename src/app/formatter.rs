use crate::app::models::{SideEffect, TargetAssembly};

pub struct OutputGenerator;

impl OutputGenerator {
    /// Render one target for the compiler-invocation collaborator: kind,
    /// include paths and the compile list.
    pub fn render_compile_view(assembly: &TargetAssembly) -> String {
        let config = &assembly.config;
        let mut out = format!("target {} ({})\n", config.name, config.kind);

        for path in &config.include_paths {
            out.push_str(&format!("    include {}\n", path.display()));
        }
        for source in &config.sources {
            out.push_str(&format!("    compile {}\n", source.display()));
        }
        for effect in &assembly.effects {
            if let SideEffect::Install { artifact, dest } = effect {
                out.push_str(&format!("    install {} -> {}\n", artifact, dest.display()));
            }
        }

        out.trim_end().to_string()
    }

    /// Render one target for the project-file collaborator: the compile
    /// list plus the header set, which is displayed in the IDE but never
    /// compiled.
    pub fn render_project_view(assembly: &TargetAssembly) -> String {
        let config = &assembly.config;
        let mut out = String::new();

        for effect in &assembly.effects {
            if let SideEffect::ProjectFile { file_name } = effect {
                out.push_str(&format!("project {} ({})\n", file_name, config.kind));
            }
        }
        for source in &config.sources {
            out.push_str(&format!("    source {}\n", source.display()));
        }
        for header in &assembly.headers {
            out.push_str(&format!("    header {}\n", header.display()));
        }

        out.trim_end().to_string()
    }

    pub fn render_all(assemblies: &[&TargetAssembly], projects: bool) -> String {
        let blocks: Vec<String> = assemblies
            .iter()
            .map(|a| {
                if projects {
                    Self::render_project_view(a)
                } else {
                    Self::render_compile_view(a)
                }
            })
            .collect();
        blocks.join("\n\n")
    }
}
