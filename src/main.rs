use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use walkdir::WalkDir;

use caseshift::{rules_file, CaseMode, Replacer};

// files processed when --extensions is not given
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "c", "cpp", "h", "hpp", "cs", "java", "py", "js", "ts", "rs", "html", "css",
    "xml", "json", "yaml", "yml", "toml", "sh", "bat", "ps1", "cmake", "rst", "tex",
];

#[derive(Parser, Debug)]
#[command(version, about = "Find and replace in files, preserving the casing style of matches")]
struct Args {
    /// File or directory to process
    path: PathBuf,

    /// Text to find. C-style escapes are decoded. Optional when
    /// --replacements-file is given
    text_to_find: Option<String>,

    /// Replacement text. C-style escapes are decoded
    replacement_text: Option<String>,

    /// Case mode for the command line rule (preserve, ignore, match)
    #[arg(long, default_value = "preserve", value_parser = parse_case_mode, value_name = "MODE")]
    case_mode: CaseMode,

    /// Only replace whole words
    #[arg(long)]
    match_whole_word: bool,

    /// Load rules from a file
    #[arg(short = 'f', long, value_name = "FILE")]
    replacements_file: Option<PathBuf>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Print detailed information during processing
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be replaced without making changes
    #[arg(long)]
    dry_run: bool,

    /// Never rename files
    #[arg(long)]
    no_rename: bool,

    /// Comma separated extensions to process instead of the built-in list
    #[arg(long, value_delimiter = ',', value_name = "EXT,...")]
    extensions: Option<Vec<String>>,
}

fn parse_case_mode(value: &str) -> Result<CaseMode, String> {
    CaseMode::from_name(value)
        .ok_or_else(|| format!("invalid case mode `{value}`, expected preserve, ignore or match"))
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let failed = error.use_stderr();
            let _ = error.print();
            std::process::exit(i32::from(failed));
        }
    };

    if let Err(error) = run(&args) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let replacer = build_replacer(args)?;

    if args.path.is_file() {
        process_file(&args.path, &replacer, args)
    } else if args.path.is_dir() {
        for path in collect_files(&args.path, args.recursive)? {
            process_file(&path, &replacer, args)?;
        }
        Ok(())
    } else {
        bail!("{} is neither a file nor a directory", args.path.display());
    }
}

/// Installs the file-loaded rules first, then the command line rule.
fn build_replacer(args: &Args) -> Result<Replacer<u8>> {
    let mut replacer = Replacer::new();
    let mut installed = 0usize;

    if let Some(file) = &args.replacements_file {
        let content = fs::read_to_string(file)
            .with_context(|| format!("reading replacements file {}", file.display()))?;
        for rule in rules_file::parse(&content)
            .with_context(|| format!("parsing replacements file {}", file.display()))?
        {
            replacer
                .add_replacement(
                    rule.find.as_bytes(),
                    rule.replace.as_bytes(),
                    rule.mode,
                    rule.whole_word,
                )
                .with_context(|| format!("installing rule for `{}`", rule.find))?;
            installed += 1;
        }
    }

    match (&args.text_to_find, &args.replacement_text) {
        (Some(find), Some(replace)) => {
            let find = rules_file::decode_escapes(find).context("decoding text-to-find")?;
            let replace =
                rules_file::decode_escapes(replace).context("decoding replacement-text")?;
            replacer
                .add_replacement(
                    find.as_bytes(),
                    replace.as_bytes(),
                    args.case_mode,
                    args.match_whole_word,
                )
                .with_context(|| format!("installing rule for `{find}`"))?;
            installed += 1;
        }
        (Some(_), None) => bail!("missing replacement-text argument"),
        (None, Some(_)) => unreachable!("clap fills positionals in order"),
        (None, None) => {
            if args.replacements_file.is_none() {
                bail!("missing text-to-find and replacement-text arguments");
            }
        }
    }

    if installed == 0 {
        bail!("no replacement rules given");
    }
    Ok(replacer)
}

/// Walks a directory up front so renames cannot disturb the traversal.
fn collect_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn wanted_extension(path: &Path, extensions: &Option<Vec<String>>) -> bool {
    let Some(extension) = path.extension().and_then(|extension| extension.to_str()) else {
        return false;
    };

    match extensions {
        Some(list) => list
            .iter()
            .any(|wanted| wanted.trim_start_matches('.') == extension),
        None => TEXT_EXTENSIONS.contains(&extension),
    }
}

fn process_file(path: &Path, replacer: &Replacer<u8>, args: &Args) -> Result<()> {
    if !wanted_extension(path, &args.extensions) {
        if args.verbose {
            println!("skipping {} (extension not selected)", path.display());
        }
        return Ok(());
    }

    let content = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let replaced = replacer.find_and_replace_to_vec(&content);
    let changed = replaced != content;

    let rename_to = if args.no_rename {
        None
    } else {
        renamed_path(path, replacer)
    };

    if !changed && rename_to.is_none() {
        if args.verbose {
            println!("no changes needed for {}", path.display());
        }
        return Ok(());
    }

    if args.verbose {
        if changed {
            println!("changes found in {}", path.display());
        }
        if let Some(target) = &rename_to {
            println!("will rename {} -> {}", path.display(), target.display());
        }
        if args.dry_run {
            println!("dry run - no changes made");
        }
    }
    if args.dry_run {
        return Ok(());
    }

    if changed {
        fs::write(path, &replaced).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(target) = rename_to {
        if target.exists() {
            bail!(
                "cannot rename {}: {} already exists",
                path.display(),
                target.display()
            );
        }
        fs::rename(path, &target).with_context(|| format!("renaming {}", path.display()))?;
    }

    Ok(())
}

/// Applies the rules to the file stem, keeping the extension. Returns `None`
/// when the name does not change or cannot be rewritten losslessly.
fn renamed_path(path: &Path, replacer: &Replacer<u8>) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let replaced = replacer.find_and_replace_to_vec(stem.as_bytes());

    if replaced == stem.as_bytes() {
        return None;
    }
    let Ok(new_stem) = String::from_utf8(replaced) else {
        log::warn!(
            "replacement for the name of {} is not valid UTF-8, not renaming",
            path.display()
        );
        return None;
    };

    let mut name = new_stem;
    if let Some(extension) = path.extension().and_then(|extension| extension.to_str()) {
        name.push('.');
        name.push_str(extension);
    }
    Some(path.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::{renamed_path, wanted_extension};
    use caseshift::{CaseMode, Replacer};
    use std::path::{Path, PathBuf};

    #[test]
    fn default_extension_list() {
        assert!(wanted_extension(Path::new("a/b.rs"), &None));
        assert!(wanted_extension(Path::new("notes.txt"), &None));
        assert!(!wanted_extension(Path::new("binary.bin"), &None));
        assert!(!wanted_extension(Path::new("Makefile"), &None));
    }

    #[test]
    fn explicit_extension_list() {
        let list = Some(vec!["rs".to_owned(), ".vndf".to_owned()]);
        assert!(wanted_extension(Path::new("a.rs"), &list));
        assert!(wanted_extension(Path::new("a.vndf"), &list));
        assert!(!wanted_extension(Path::new("a.txt"), &list));
    }

    #[test]
    fn renames_follow_the_rules() {
        let mut replacer: Replacer<u8> = Replacer::new();
        replacer
            .add_replacement(b"old name", b"new name", CaseMode::Preserve, false)
            .unwrap();

        assert_eq!(
            renamed_path(Path::new("src/OldName.cpp"), &replacer),
            Some(PathBuf::from("src/NewName.cpp"))
        );
        assert_eq!(renamed_path(Path::new("src/other.cpp"), &replacer), None);
    }
}
