#[macro_use]
extern crate clap;

use itertools::Itertools;
use source_span::{
	fmt::{Formatter, Style},
	Position, SourceBuffer,
};
use std::{
	fs::File,
	io::{self, BufReader, Read, Write},
};
use utf8_decode::UnsafeDecoder;
use yansi::Paint;

use glushkov::{
	automaton::DisplayState,
	syntax::{self, Parsable},
	Analysis, Automaton, RegExp,
};

fn main() -> io::Result<()> {
	// Parse options.
	let yaml = load_yaml!("glushkov.yml");
	let matches = clap::App::from_yaml(yaml).get_matches();

	// Init logger.
	let verbosity = matches.occurrences_of("verbose") as usize;
	stderrlog::new().verbosity(verbosity).init().unwrap();

	let chars: Vec<char> = match matches.value_of("expression") {
		Some(expr) => expr.chars().collect(),
		None => match matches.value_of("FILE") {
			Some(filename) => {
				let file = File::open(filename)?;
				let mut chars = Vec::new();
				for c in UnsafeDecoder::new(BufReader::new(file).bytes()) {
					chars.push(c?);
				}
				chars
			}
			None => {
				eprintln!("no expression to process");
				std::process::exit(1)
			}
		},
	};

	let metrics = source_span::DefaultMetrics::with_tab_stop(4);
	let buffer = SourceBuffer::new(
		chars.into_iter().map(|c| Ok(c)),
		Position::default(),
		metrics,
	);
	let mut lexer = syntax::Lexer::new(buffer.iter(), metrics).peekable();

	log::info!("parsing expression...");
	match RegExp::parse(&mut lexer) {
		Ok(exp) => {
			let (exp, leaf_count) = exp.into_inner().index();
			log::info!("expression has {} leaves", leaf_count);

			let analysis = Analysis::new(&exp, leaf_count);
			let automaton = Automaton::new(&analysis);

			if matches.is_present("dot") {
				let stdout = io::stdout();
				let mut out = stdout.lock();
				automaton.dot_write(&mut out)?;
				write!(out, "\n")?;
			} else if matches.is_present("sets") {
				print_follow_table(&analysis);
			} else {
				print_transition_table(&automaton);
			}

			Ok(())
		}
		Err(e) => {
			let mut fmt = Formatter::new();
			fmt.add(e.span(), Some(format!("{}", e)), Style::Error);
			let formatted = fmt.render(buffer.iter(), buffer.span(), &metrics)?;
			eprintln!("{}", formatted);
			std::process::exit(1)
		}
	}
}

fn print_follow_table(analysis: &Analysis) {
	println!("{:<10} {:<10} FOLLOW", "POSITION", "SYMBOL");
	for p in 1..=analysis.leaf_count() {
		println!(
			"{:<10} {:<10} {{{}}}",
			p,
			analysis.leaf_symbol(p).as_str(),
			analysis.follow(p).iter().format(",")
		);
	}

	println!(
		"{} first={{{}}} last={{{}}} nullable={}",
		Paint::green("root:").bold(),
		analysis.first().iter().format(","),
		analysis.last().iter().format(","),
		analysis.nullable()
	);
}

fn print_transition_table(automaton: &Automaton) {
	let labels: Vec<String> = automaton
		.states()
		.iter()
		.enumerate()
		.map(|(i, q)| format!("S{}={}", i, DisplayState(q)))
		.collect();
	let width = labels.iter().map(|l| l.len()).max().unwrap_or(0).max(5);

	print!("{:<width$}", "STATE", width = width);
	for symbol in automaton.alphabet() {
		print!(" {:<8}", symbol.as_str());
	}
	println!();

	for (i, label) in labels.iter().enumerate() {
		print!("{:<width$}", label, width = width);
		for (_symbol, target) in automaton.successors(i as u32) {
			match target {
				Some(j) => print!(" {:<8}", format!("S{}", j)),
				None => print!(" {:<8}", "-"),
			}
		}
		println!();
	}

	println!(
		"{} {} states over {} symbols",
		Paint::green("done:").bold(),
		automaton.states().len(),
		automaton.alphabet().len()
	);
}
