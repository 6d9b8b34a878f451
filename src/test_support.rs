//! Shared fixtures for unit tests

use crate::data::{merge_trades, read_sentiment, read_trades, MergedTable};

pub const SENTIMENT_CSV: &str = "\
timestamp,value,classification,date
1704067200,30,Fear,2024-01-01
1704153600,72,Greed,2024-01-02
1704326400,50,Neutral,2024-01-04
";

/// Fear: [10, -5], Greed: [20, 20, -10], one trade on a day without sentiment
pub const TRADES_CSV: &str = "\
Account,Coin,Execution Price,Size Tokens,Side,Timestamp IST,Closed PnL,Trade ID
0xa1,BTC,42000.5,0.1,BUY,01-01-2024 09:30,10,1001
0xa1,ETH,2300,1,SELL,01-01-2024 14:05,-5,1002
0xb2,BTC,42500,0.2,SELL,02-01-2024 10:00,20,1003
0xb2,SOL,95.2,10,BUY,02-01-2024 11:15,20,1004
0xa1,ETH,2310,2,BUY,02-01-2024 16:45,-10,1005
0xc3,BTC,41000,0.1,BUY,03-01-2024 08:00,7,1006
";

pub fn sample_table() -> MergedTable {
    let sentiment = read_sentiment(SENTIMENT_CSV.as_bytes(), "sentiment").unwrap();
    let trades = read_trades(TRADES_CSV.as_bytes(), "trades").unwrap();
    merge_trades(trades, &sentiment)
}
