use chic_rules::chess_boards::chess_board::INITIAL_POSITION;
use chic_rules::chess_boards::perft::perft;
use chic_rules::{ChessError, FixedPromotion, Game, GreedyCaptureSelector, MoveSelector, Outcome, PieceType, Position};

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

fn main() {
    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Print the board after every move"
        ))
        .subcommand(
            Command::new("play")
                .about("Let the capture-first selector play both sides")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION))
                .arg(arg!(-s --seed <seed> "Seed for the move selector").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(-n --"max-plies" <plies> "Stop after this many plies")
                        .default_value("200")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-p --promote <piece> "Promotion piece")
                        .default_value("q")
                        .value_parser(["q", "r", "b", "n"]),
                ),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION))
                .arg(
                    arg!(-x --depth <d> "depth")
                        .default_value("3")
                        .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(-m --moves <moves> "List of moves")
                        .num_args(1..)
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("moves")
                .about("List the legal moves of the side to move")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION))
                .arg(arg!(-q --square <square> "Only moves starting on this square")),
        )
        .get_matches();

    let debug = matches.get_flag("debug");

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => play(arg_matches, debug),
        Some(("perft", arg_matches)) => run_perft(arg_matches),
        Some(("moves", arg_matches)) => list_moves(arg_matches),
        None => play_default(debug),
        _ => unreachable!("Exhausted list of subcommands"),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Tabled)]
struct HistoryRow {
    ply: usize,
    side: String,
    #[tabled(rename = "move")]
    mv: String,
    piece: char,
    captured: String,
}

#[derive(Tabled)]
struct MoveRow {
    #[tabled(rename = "move")]
    mv: String,
    piece: char,
    captured: String,
}

fn describe(outcome: Option<Outcome>) -> String {
    match outcome {
        Some(Outcome::Checkmate { winner }) => format!("checkmate, {} wins", winner),
        Some(Outcome::Stalemate) => String::from("stalemate"),
        None => String::from("unfinished"),
    }
}

fn promotion_piece(arg_matches: &ArgMatches) -> PieceType {
    arg_matches
        .get_one::<String>("promote")
        .and_then(|p| p.chars().next())
        .and_then(PieceType::from_char)
        .map_or(PieceType::Queen, PieceType::as_promotion)
}

fn play_default(debug: bool) -> Result<(), ChessError> {
    self_play(Game::new(), Pcg64::from_entropy(), 200, debug)
}

fn play(arg_matches: &ArgMatches, debug: bool) -> Result<(), ChessError> {
    let fen = arg_matches.get_one::<String>("fen").map_or(INITIAL_POSITION, |f| f.as_str());
    let max_plies = arg_matches.get_one::<usize>("max-plies").copied().unwrap_or(200);
    let promotion = promotion_piece(arg_matches);
    let rng = match arg_matches.get_one::<u64>("seed") {
        Some(seed) => Pcg64::seed_from_u64(*seed),
        None => Pcg64::from_entropy(),
    };

    let game = Game::from_fen(fen)?.with_promotion(FixedPromotion(promotion));
    self_play(game, rng, max_plies, debug)
}

fn self_play(mut game: Game, mut rng: Pcg64, max_plies: usize, debug: bool) -> Result<(), ChessError> {
    let selector = GreedyCaptureSelector;
    println!("{} plays both sides", selector.name());

    let mut table_rows = Vec::new();
    for ply in 1..=max_plies {
        let side = game.active_color();
        let mv = match selector.select_move(&game, &mut rng) {
            Some(mv) => mv,
            None => break,
        };
        game.make_move(mv)?;
        table_rows.push(HistoryRow {
            ply,
            side: side.to_string(),
            mv: mv.as_algebraic(),
            piece: mv.piece.to_char(),
            captured: mv.captured.map_or(String::new(), |p| p.to_char().to_string()),
        });
        if debug {
            println!("{}. {} {}", ply, side, mv);
            println!("{}", game.board().render_to_string());
        }
    }

    println!("{}", Table::new(table_rows).with(Style::modern()));
    println!("{}", game.board().render_to_string());
    println!("Result: {}", describe(game.outcome()));
    if game.in_check(game.active_color()) && !game.is_game_over() {
        println!("{} is in check", game.active_color());
    }
    Ok(())
}

fn run_perft(arg_matches: &ArgMatches) -> Result<(), ChessError> {
    let fen = arg_matches.get_one::<String>("fen").map_or(INITIAL_POSITION, |f| f.as_str());
    let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
    let moves = arg_matches
        .get_many::<String>("moves")
        .unwrap_or_default()
        .filter(|&v| !v.is_empty())
        .collect::<Vec<_>>();

    println!("Perft test for {} moves {:?} with depth {}", fen, moves, depth);
    let mut game = Game::from_fen(fen)?;
    for m in moves {
        game.play(m)?;
    }

    let mut result_moves = Vec::<(String, u64)>::new();
    for mv in game.all_legal_moves() {
        let mut new_game = game.clone();
        new_game.make_move(mv)?;
        result_moves.push((mv.as_algebraic(), perft(&new_game, depth.saturating_sub(1))));
    }
    result_moves.sort();

    let mut num_nodes = 0;
    for (m, c) in result_moves {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    Ok(())
}

fn list_moves(arg_matches: &ArgMatches) -> Result<(), ChessError> {
    let fen = arg_matches.get_one::<String>("fen").map_or(INITIAL_POSITION, |f| f.as_str());
    let game = Game::from_fen(fen)?;
    let square = match arg_matches.get_one::<String>("square") {
        Some(square) => Some(Position::from_algebraic(square)?),
        None => None,
    };

    let table_rows: Vec<MoveRow> = game
        .all_legal_moves()
        .into_iter()
        .filter(|mv| square.map_or(true, |from| mv.from == from))
        .map(|mv| MoveRow {
            mv: mv.as_algebraic(),
            piece: mv.piece.to_char(),
            captured: mv.captured.map_or(String::new(), |p| p.to_char().to_string()),
        })
        .collect();

    println!("{}", game.board().render_to_string());
    println!("{}", Table::new(table_rows).with(Style::modern()));
    println!("Result: {}", describe(game.outcome()));
    Ok(())
}
