use intervals::*;
use tracing_subscriber::EnvFilter;

// an example: run with `RUST_LOG=debug` to see the trees being built
fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let genes = IntervalTree::build(vec![
        IntervalPayload::new(1, 3, "A"),
        IntervalPayload::new(5, 8, "B"),
        IntervalPayload::new(2, 4, "C"),
    ]);
    println!("{}", genes);
    for index in 0..10 {
        match genes.query(index) {
            Some(found) => println!("{}: {}", index, found),
            None => println!("{}: nothing", index),
        }
    }

    let sums = FlatSegmentTree::build(vec![
        RangeSumPayload::new(0, 4, 10),
        RangeSumPayload::new(5, 9, 20),
    ])?;
    println!("{}", sums);
    if let Some(found) = sums.query_range(2, 6) {
        println!("sum over 2->6: {}", found);
    }

    let minima = DynamicSegmentTree::build(vec![
        RangeMinPayload::new(0, 10, Number::Int(5)),
        RangeMinPayload::new(3, 7, Number::Double(2.5)),
    ])?;
    println!("{}", minima);
    if let Some(found) = minima.query(5) {
        println!("minimum at 5: {}", found);
    }

    Ok(())
}
