use std::env;
use std::fs;
use std::process::ExitCode;

use hamstack::{table, Rectangle, Stack};

fn main() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<_>>();

    match args.first().map(String::as_str) {
        None => {
            demo();
            ExitCode::SUCCESS
        }
        Some("table") => run_table(&args[1..]),
        Some(path) => run_file(path),
    }
}

// "R2: m=4, n=3" -> (2, 4, 3); header lines like "R2 (middle): C4 ..." fall out as None
fn parse_rect_line(line: &str) -> Option<(usize, usize, usize)> {
    let rest = line.trim().strip_prefix('R')?;
    let (index, fields) = rest.split_once(':')?;
    let index = index.trim().parse().ok()?;

    let mut m = None;
    let mut n = None;
    for field in fields.split(',') {
        let (key, value) = field.split_once('=')?;
        match key.trim() {
            "m" => m = value.trim().parse().ok(),
            "n" => n = value.trim().parse().ok(),
            _ => return None,
        }
    }

    Some((index, m?, n?))
}

// every "Example" line opens a block of rectangle lines; incomplete trailing blocks are kept
fn parse_examples(text: &str) -> Vec<Vec<(usize, usize, usize)>> {
    let mut examples = Vec::new();
    let mut current: Vec<(usize, usize, usize)> = Vec::new();

    for line in text.lines() {
        if line.trim().starts_with("Example") {
            if !current.is_empty() {
                examples.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(entry) = parse_rect_line(line) {
            current.push(entry);
        }
    }
    if !current.is_empty() {
        examples.push(current);
    }

    examples
}

// R1 is the bottommost level
fn build_stack(levels: &[(usize, usize, usize)]) -> Result<Stack, String> {
    let mut levels = levels.to_vec();
    levels.sort_by_key(|&(index, _, _)| index);

    let mut rects = Vec::with_capacity(levels.len());
    for (index, m, n) in levels {
        match Rectangle::new(m, n) {
            Ok(rect) => rects.push(rect),
            Err(err) => return Err(format!("R{}: {}", index, err)),
        }
    }

    Ok(Stack::new(rects))
}

fn report(stack: &Stack) {
    for (index, rect) in stack.levels().iter().enumerate().rev() {
        println!("  R{}: m={}, n={}", index + 1, rect.width(), rect.height());
    }

    let solutions = stack.solve();
    print!("{}", solutions);

    for (index, chain) in solutions.chains().iter().take(10).enumerate() {
        if let Some((start, end)) = stack.endpoints(chain) {
            println!("{:3}. whole: s={} -> t={}", index + 1, start, end);
        }
    }
}

fn run_file(path: &str) -> ExitCode {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("cannot read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let examples = parse_examples(&text);
    if examples.is_empty() {
        eprintln!("no examples found in {}", path);
        return ExitCode::FAILURE;
    }

    for (index, levels) in examples.iter().enumerate() {
        println!("Example {}", index + 1);
        match build_stack(levels) {
            Ok(stack) => report(&stack),
            Err(reason) => eprintln!("  skipped: {}", reason),
        }
        println!();
    }

    ExitCode::SUCCESS
}

fn run_table(args: &[String]) -> ExitCode {
    let dims = match args {
        [m, n] => m.parse::<usize>().ok().zip(n.parse::<usize>().ok()),
        _ => None,
    };

    match dims {
        None => {
            eprintln!("usage: solver table <m> <n>");
            ExitCode::FAILURE
        }
        Some((m, n)) => match Rectangle::new(m, n) {
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
            Ok(rect) => {
                let map = rect.endpoint_map();
                print!("{}", map);
                print!("{}", table::csv(&map));
                ExitCode::SUCCESS
            }
        },
    }
}

fn demo() {
    // a two-column tower: 2x4 stacked on 2x3
    let stack = Stack::new(vec![
        Rectangle::new(2, 3).unwrap(),
        Rectangle::new(2, 4).unwrap(),
    ]);

    for (index, rect) in stack.levels().iter().enumerate().rev() {
        println!("R{}: m={}, n={}", index + 1, rect.width(), rect.height());
        print!("{}", rect.endpoint_map());
    }

    let solutions = stack.solve();
    print!("{}", solutions);

    for chain in solutions.chains() {
        if let Some((start, end)) = stack.endpoints(chain) {
            println!("whole: s={} -> t={}", start, end);
        }
    }
}
