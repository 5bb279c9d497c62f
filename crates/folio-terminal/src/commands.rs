//! Built-in portfolio commands: canned text for the fixed vocabulary.

use crate::interpreter::{Command, CommandTable, CommandTableBuilder};

/// A command whose output is a fixed literal.
struct CannedCmd {
    name: &'static str,
    description: &'static str,
    text: &'static str,
}

impl Command for CannedCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn execute(&self) -> String {
        self.text.to_string()
    }
}

const BUILTINS: &[(&str, &str, &str)] = &[
    (
        "help",
        "Show available commands",
        "Available commands: about, skills, projects, contact, clear, whoami, sudo, ls, pwd, uname",
    ),
    (
        "whoami",
        "Display user information",
        "anuj - Fullstack Web/App · AI/ML Engineer",
    ),
    (
        "about",
        "Learn more about me",
        "Passionate developer who loves Linux, open source, and building amazing things.",
    ),
    (
        "skills",
        "View my technical skills",
        "Web Development, Mobile Apps, AI/ML & Data Science, DevOps & Linux, Programming Languages, Databases & Storage, Security & Monitoring, Tools & Technologies",
    ),
    (
        "projects",
        "Explore my projects",
        "Check out my 18+ projects including Linux tools, AI/ML systems, and cloud infrastructure!",
    ),
    (
        "contact",
        "Get in touch",
        "Ready to collaborate? Send me a message using the contact form!",
    ),
    ("clear", "Clear the input line", ""),
    (
        "sudo",
        "Elevate privileges",
        "Permission granted. Welcome to the matrix! 🚀",
    ),
    (
        "ls",
        "List directory contents",
        "home/ about/ projects/ contact/ skills/ resume.pdf",
    ),
    ("pwd", "Print working directory", "/home/anuj/portfolio"),
    (
        "uname",
        "Print system information",
        "Linux portfolio 5.15.0-anuj #1 SMP Ubuntu x86_64 GNU/Linux",
    ),
    (
        "cat",
        "Show file contents",
        "Usage: cat [file]. Try: cat about.txt or cat skills.txt",
    ),
    (
        "cat about.txt",
        "About file",
        "Linux developer passionate about open source, system administration, and building scalable applications.",
    ),
    (
        "cat skills.txt",
        "Skills file",
        "JavaScript, TypeScript, Python, Go, Rust, React, Vue.js, Node.js, Docker, Kubernetes, AWS, Linux Admin, TensorFlow, PyTorch, PostgreSQL, MongoDB, Security Auditing, and 50+ more technologies!",
    ),
    (
        "ps",
        "List processes",
        "PID TTY TIME CMD\n1234 pts/0 00:00:01 portfolio\n5678 pts/0 00:00:00 awesome_projects",
    ),
    (
        "top",
        "Show system load",
        "Tasks: 42 total, 1 running, 41 sleeping\nCPU: 15.2%us, 8.1%sy, 0.0%ni, 76.7%id\nMem: 8192MB total, 4096MB used",
    ),
    (
        "df",
        "Show disk usage",
        "Filesystem Size Used Avail Use% Mounted on\n/dev/sda1 100G 42G 58G 42% /\n/dev/sda2 500G 200G 300G 40% /home",
    ),
];

/// Register the built-in vocabulary into a table builder.
pub fn register_builtins(builder: &mut CommandTableBuilder) {
    for &(name, description, text) in BUILTINS {
        builder.register(Box::new(CannedCmd {
            name,
            description,
            text,
        }));
    }
}

/// Build the stock table with just the built-in vocabulary.
pub fn builtin_table() -> CommandTable {
    let mut builder = CommandTable::builder();
    register_builtins(&mut builder);
    builder.build()
}

/// Commands the startup banner advertises, in display order.
const BANNER_COMMANDS: [&str; 6] = ["help", "whoami", "about", "skills", "projects", "contact"];

/// Startup banner listing the main commands registered in `table`.
pub fn welcome_banner(table: &CommandTable) -> String {
    let mut out = String::new();
    out.push_str("+--------------------------------------------------------+\n");
    out.push_str("|  Welcome to Anuj's Portfolio Terminal!                 |\n");
    out.push_str("|                                                        |\n");
    out.push_str("|  Available commands:                                   |\n");
    for name in BANNER_COMMANDS {
        let Some(description) = table.describe(name) else {
            continue;
        };
        let entry = format!("  * {name:<9}- {description}");
        out.push_str(&format!("|{entry:<56}|\n"));
    }
    out.push_str("|                                                        |\n");
    out.push_str("|  Try the Konami code for a surprise! ^^vv<><>BA        |\n");
    out.push_str("+--------------------------------------------------------+");
    out
}
