//! Templates compiled into the binary.

use super::{ProjectType, Template, TemplateFile};

const GITIGNORE: &str = include_str!("../../assets/templates/shared/gitignore");
const CLAUDE_MD: &str = include_str!("../../assets/templates/shared/CLAUDE.md.tera");
const PROJECT_OVERVIEW: &str = include_str!("../../assets/templates/shared/project-overview.md.tera");

const SKILL_FILES: [(&str, &str); 4] = [
    (
        ".claude/skills/requirements-analyzer.md",
        include_str!("../../assets/skills/requirements-analyzer.md"),
    ),
    (
        ".claude/skills/architecture-designer.md",
        include_str!("../../assets/skills/architecture-designer.md"),
    ),
    (
        ".claude/skills/developer-guide.md",
        include_str!("../../assets/skills/developer-guide.md"),
    ),
    (
        ".claude/skills/test-planner.md",
        include_str!("../../assets/skills/test-planner.md"),
    ),
];

const DOC_DIRECTORIES: [&str; 5] = [
    "docs/modules",
    "docs/architecture",
    "docs/trackers",
    "docs/PRD",
    "docs/PRD/assets/images",
];

pub fn all() -> Vec<Template> {
    vec![web_fullstack(), frontend_demo()]
}

pub fn web_fullstack() -> Template {
    Template::new("web-fullstack", ProjectType::WebFullstack, "Web full-stack project")
        .description("Frontend and backend web application with development docs and assistant skills")
        .directories(["src/frontend", "src/backend", "src/shared"])
        .directories(DOC_DIRECTORIES)
        .directories([
            ".claude/skills",
            "tests/frontend",
            "tests/backend",
            "tests/integration",
            "dist",
            "public",
        ])
        .file(TemplateFile::rendered(
            "README.md",
            include_str!("../../assets/templates/web-fullstack/README.md.tera"),
        ))
        .file(TemplateFile::rendered(
            "package.json",
            include_str!("../../assets/templates/web-fullstack/package.json.tera"),
        ))
        .files(common_files())
        .script("dev:frontend", "cd src/frontend && npm run dev")
        .script("dev:backend", "cd src/backend && npm run dev")
        .script("dev", "concurrently \"npm run dev:frontend\" \"npm run dev:backend\"")
        .script("build:frontend", "cd src/frontend && npm run build")
        .script("build:backend", "cd src/backend && npm run build")
        .script("build", "npm run build:frontend && npm run build:backend")
        .script("test", "jest")
        .script("test:watch", "jest --watch")
        .script("lint", "eslint . --ext .ts,.tsx")
        .script("format", "prettier --write \"**/*.{ts,tsx,json,md}\"")
}

pub fn frontend_demo() -> Template {
    Template::new("frontend-demo", ProjectType::FrontendDemo, "Frontend-only project")
        .description("Frontend-only project for demos, prototypes and static sites")
        .directories([
            "src",
            "src/assets",
            "src/assets/images",
            "src/assets/styles",
            "src/components",
            "src/utils",
        ])
        .directories(DOC_DIRECTORIES)
        .directories([".claude/skills", "public"])
        .file(TemplateFile::rendered(
            "README.md",
            include_str!("../../assets/templates/frontend-demo/README.md.tera"),
        ))
        .file(TemplateFile::rendered(
            "package.json",
            include_str!("../../assets/templates/frontend-demo/package.json.tera"),
        ))
        .file(TemplateFile::rendered(
            "index.html",
            include_str!("../../assets/templates/frontend-demo/index.html.tera"),
        ))
        .file(TemplateFile::rendered(
            "src/main.js",
            include_str!("../../assets/templates/frontend-demo/main.js.tera"),
        ))
        .file(TemplateFile::verbatim(
            "src/assets/styles/main.css",
            include_str!("../../assets/templates/frontend-demo/main.css"),
        ))
        .file(TemplateFile::verbatim(
            "vite.config.js",
            include_str!("../../assets/templates/frontend-demo/vite.config.js"),
        ))
        .files(common_files())
        .script("dev", "vite")
        .script("build", "vite build")
        .script("preview", "vite preview")
        .script("lint", "eslint . --ext .js,.jsx,.ts,.tsx")
        .script(
            "format",
            "prettier --write \"**/*.{js,jsx,ts,tsx,css,html,json,md}\"",
        )
}

fn common_files() -> Vec<TemplateFile> {
    let mut files = vec![
        TemplateFile::verbatim(".gitignore", GITIGNORE),
        TemplateFile::rendered("CLAUDE.md", CLAUDE_MD),
        TemplateFile::rendered("docs/00-project-overview.md", PROJECT_OVERVIEW),
    ];
    files.extend(
        SKILL_FILES
            .iter()
            .map(|(path, content)| TemplateFile::verbatim(*path, *content)),
    );
    files
}
