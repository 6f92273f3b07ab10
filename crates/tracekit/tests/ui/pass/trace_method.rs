use tracekit::{trace_method, Instrument};

#[derive(Debug, Default, Instrument)]
struct Counter {
    hits: u32,
}

impl Counter {
    #[trace_method]
    fn bump(&mut self, by: u32) -> u32 {
        self.hits += by;
        self.hits
    }

    #[trace_method(color = "Magenta")]
    fn reset(&mut self) {
        self.hits = 0;
    }

    #[trace_method(label = "parse input")]
    fn parse(&self, input: &str) -> Result<u32, std::num::ParseIntError> {
        let value: u32 = input.trim().parse()?;
        Ok(value + self.hits)
    }

    #[trace_method]
    fn digits(&self) -> impl Iterator<Item = u32> {
        vec![self.hits].into_iter()
    }

    #[trace_method]
    fn early(&self, flag: bool) -> &'static str {
        if flag {
            return "early";
        }
        "late"
    }
}

fn main() {
    let mut counter = Counter::default();
    assert_eq!(counter.bump(2), 2);
    counter.reset();
    assert_eq!(counter.parse(" 7 "), Ok(7));
    assert!(counter.parse("x").is_err());
    assert_eq!(counter.digits().count(), 1);
    assert_eq!(counter.early(true), "early");
}
