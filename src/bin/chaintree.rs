//! Interactive shell for poking at a tree by hand.

use std::env;

use chaintree::{BPlusTree, MIN_CAPACITY};
use rustyline::{error::ReadlineError, DefaultEditor};

const EXIT_CMD: &str = "quit";

fn main() -> rustyline::Result<()> {
    let capacity = env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>().expect("capacity parse error"))
        .unwrap_or(MIN_CAPACITY);

    let mut tree = match BPlusTree::new(capacity) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    println!(
        "ChainTree shell, node capacity {capacity}. Type 'help' for commands or '{EXIT_CMD}' to exit.\n"
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("chaintree> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                if line == EXIT_CMD {
                    break;
                }
                run_command(&mut tree, capacity, line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    Ok(())
}

fn run_command(tree: &mut BPlusTree, capacity: usize, line: &str) {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let arg = words.next();

    match (command, arg) {
        ("insert", Some(raw)) => match raw.parse::<i64>() {
            Ok(key) => match tree.insert(key) {
                Ok(()) => println!("inserted {key}"),
                Err(e) => println!("{e}"),
            },
            Err(_) => println!("'{raw}' is not an integer"),
        },
        ("delete", Some(raw)) => match raw.parse::<i64>() {
            Ok(key) => match tree.delete(key) {
                Ok(()) => println!("deleted {key}"),
                Err(e) => println!("{e}"),
            },
            Err(_) => println!("'{raw}' is not an integer"),
        },
        ("leaves", None) => {
            let keys: Vec<String> = tree.iter().map(|k| k.to_string()).collect();
            println!("[{}]", keys.join(" "));
        }
        ("tree", None) => {
            print!("{}", tree.shape());
            println!("{} keys in {} nodes", tree.len(), tree.node_count());
        }
        ("reset", None) => {
            // Capacity was validated at startup.
            *tree = BPlusTree::new(capacity).unwrap();
            println!("tree cleared");
        }
        ("help", None) => {
            println!("insert <key>  add a key");
            println!("delete <key>  remove a key");
            println!("leaves        print every key in ascending order");
            println!("tree          print the node hierarchy");
            println!("reset         start over with an empty tree");
            println!("{EXIT_CMD}          exit the shell");
        }
        _ => println!("unknown command '{line}', try 'help'"),
    }
}
