use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::{ast::ast::TreeId, errors::errors::CompileError, session::Session};

lazy_static! {
    static ref OCTAL_LITERAL: Regex = Regex::new(r"^0([0-7]+)$").unwrap();
}

/// Rewrites a literal into Python syntax. Only octal literals differ.
pub fn python_literal(text: &str) -> Cow<'_, str> {
    OCTAL_LITERAL.replace(text, "0o$1")
}

fn write_arguments<W: Write>(session: &Session, group: TreeId, out: &mut W) -> io::Result<()> {
    let arena = session.arena();
    for (i, value) in arena.children(group).iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{}", python_literal(arena.value(*value)))?;
    }
    Ok(())
}

/// Writes the Python `unittest` harness for every module in `session`.
///
/// Each module becomes a `Test_<module>` case that loads `./lib<module>.so`
/// and compares every function against the Python module of the same name,
/// once per argument group.
pub fn generate<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let arena = session.arena();

    writeln!(out, "import unittest")?;
    writeln!(out, "from ctypes import cdll")?;
    for module in session.modules() {
        writeln!(out, "import {}", arena.name_of(*module))?;
    }

    for module in session.modules() {
        let module_name = arena.name_of(*module);
        writeln!(out, "class Test_{}(unittest.TestCase):", module_name)?;
        writeln!(out, "\tdef setUp(self):")?;
        writeln!(out, "\t\tself.lib = cdll.LoadLibrary('./lib{}.so')", module_name)?;

        for function in arena.body_of(*module) {
            let function_name = arena.name_of(*function);
            writeln!(out, "\tdef test_{}(self):", function_name)?;

            let groups = arena.body_of(*function);
            if groups.is_empty() {
                writeln!(out, "\t\tpass")?;
            }
            for group in groups {
                write!(out, "\t\tself.assertEqual(self.lib.{}(", function_name)?;
                write_arguments(session, *group, out)?;
                write!(out, "), {}.{}(", module_name, function_name)?;
                write_arguments(session, *group, out)?;
                writeln!(out, "))")?;
            }
        }
    }

    writeln!(out, "if __name__ == '__main__':")?;
    for module in session.modules() {
        writeln!(
            out,
            "\tsuite = unittest.TestLoader().loadTestsFromTestCase(Test_{})",
            arena.name_of(*module)
        )?;
        writeln!(out, "\tunittest.TextTestRunner(verbosity=2).run(suite)")?;
    }

    Ok(())
}

/// Writes `<dir>/<basename>.py` and returns its path.
pub fn write_harness(
    session: &Session,
    dir: &Path,
    basename: &str,
) -> Result<PathBuf, CompileError> {
    let path = dir.join(format!("{}.py", basename));
    debug!("writing harness to {}", path.display());

    let written = File::create(&path).and_then(|file| {
        let mut out = BufWriter::new(file);
        generate(session, &mut out)?;
        out.flush()
    });

    match written {
        Ok(()) => {
            info!("finished generating python code");
            Ok(path)
        }
        Err(source) => Err(CompileError::CannotWrite { path, source }),
    }
}
