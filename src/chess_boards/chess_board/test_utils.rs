use super::{Move, Position};

pub fn assert_positions<I: IntoIterator<Item = Position>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.into_iter().map(|p| p.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}

pub fn assert_moves<I: IntoIterator<Item = Move>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.into_iter().map(|m| m.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}
