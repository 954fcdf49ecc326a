use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> String {
    let block = std::fs::read_to_string(format!(
        "{}/resources/coach.wag",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let body = block.split_once('\n').unwrap().1.replace("include", "comment");
    body.repeat(200)
}

pub mod read {
    use divan::Bencher;
    use stf_reader::StfReader;

    #[divan::bench]
    fn items(bencher: Bencher) {
        bencher.with_inputs(super::get_input).bench_refs(|text| {
            let mut reader = StfReader::from_text(text, "bench.wag");
            while !reader.eof() {
                divan::black_box(reader.read_item().unwrap());
            }
            reader.finish()
        });
    }

    #[divan::bench]
    fn skip_blocks(bencher: Bencher) {
        bencher.with_inputs(super::get_input).bench_refs(|text| {
            let mut reader = StfReader::from_text(text, "bench.wag");
            while !reader.eof() {
                reader.read_item().unwrap();
                reader.skip_block().unwrap();
            }
            reader.finish()
        });
    }
}

pub mod values {
    use divan::Bencher;
    use stf_reader::{StfReader, Units};

    #[divan::bench(args = ["40t", "2.5bar", "60mph", "1,000.5kN#approx"])]
    fn float_block(bencher: Bencher, value: &str) {
        let text = format!("( {value} ) ").repeat(1000);
        bencher.with_inputs(|| text.clone()).bench_refs(|text| {
            let mut reader = StfReader::from_text(text, "bench.stf");
            while !reader.eof() {
                divan::black_box(reader.read_float_block(Units::ANY, None).unwrap());
            }
            reader.finish()
        });
    }
}
