mod existence;
mod round_trip;
