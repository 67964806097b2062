//! Temperature sensor keys read on every collection pass.
//!
//! Not every Mac exposes every key; missing registers fail per key and are
//! skipped for that pass.

/// Temperature keys, grouped by the part of the machine they sit in.
pub const TEMPERATURE_KEYS: &[&str] = &[
    // Intel CPU die, proximity and core sensors
    "TC0C", "TC0D", "TC0E", "TC0F", "TC0G", "TC0H", "TC0J", "TC0P", "TC0c", "TC0d",
    "TC0p", "TC1C", "TC1D", "TC1E", "TC1F", "TC1P", "TC2C", "TC3C", "TC4C", "TC5C",
    "TC6C", "TC7C", "TC8C", "TC9C", "TCAC", "TCBC", "TCAD", "TCGC", "TCGc", "TCHP",
    "TCMX", "TCSA", "TCSC", "TCSc", "TCTD", "TCXC", "TCXc", "TCXr",
    // Intel GPU and platform controller hub
    "TG0C", "TG0D", "TG0F", "TG0H", "TG0P", "TG0T", "TG0V", "TG0d", "TG0p", "TG1D",
    "TG1F", "TG1H", "TG1P", "TG1d", "TGDD", "TGVP", "TPCD", "TPCd", "TP0P", "TP0p",
    "TP0D", "TPMP", "TPSP",
    // Ambient, airflow and enclosure
    "TA0P", "TA0S", "TA0V", "TA0p", "TA1P", "TA1S", "TA1p", "TA2P", "TA2S", "TA3S",
    "TaLC", "TaLP", "TaLT", "TaLW", "TaRC", "TaRF", "TaRT", "TaRW", "TaTP", "Ts0P",
    "Ts0S", "Ts1P", "Ts1S", "Ts2P", "Ts2S", "Ts3P", "Ts3S", "Ts4S", "Ts5S", "Ts6S",
    "Ts7S", "Ts8S", "Ts9S", "TsOP", "TsOS",
    // Battery and charger
    "TB0T", "TB1T", "TB2T", "TB3T", "TBXT", "TC1B", "TCHT", "TChT", "TQ0J", "TQ1J",
    "TQ2J",
    // Storage, memory and I/O
    "TH0A", "TH0B", "TH0C", "TH0F", "TH0O", "TH0P", "TH0R", "TH0V", "TH0X", "TH0a",
    "TH0b", "TH0c", "TH0x", "TH1A", "TH1B", "TH1C", "TH1F", "TH1O", "TH1P", "TH1R",
    "TH1V", "TH1a", "TH1b", "TH1c", "TH2P", "TH3P", "TI0P", "TI0p", "TI1P", "TI1p",
    "TL0P", "TL0V", "TL0p", "TL1P", "TL1V", "TM0P", "TM0S", "TM0V", "TM0p", "TM1P",
    "TM1S", "TM2P", "TM2S", "TM3P", "TM3S", "TMBS", "TMLB", "TMXP", "TN0C", "TN0D",
    "TN0H", "TN0P", "TN0p", "TN1D", "TN1P", "TO0P", "TO0p", "TW0P", "TW0p", "TW1P",
    // Palm rest, display and heatsink
    "TPD0", "TPD1", "TPD2", "TPD3", "TPD4", "TPD5", "TPD6", "TPD7", "TPD8", "TPD9",
    "TPDX", "Th0H", "Th0N", "Th0R", "Th1H", "Th1N", "Th2H", "Th2N", "TL0D", "TL1D",
    "TVA0", "TVD0", "TVM0", "TVS0", "Tm0P", "Tm1P", "Tm2P", "TmDP", "TW0D",
    // Apple silicon performance and efficiency clusters
    "Tp00", "Tp01", "Tp02", "Tp04", "Tp05", "Tp06", "Tp08", "Tp09", "Tp0A", "Tp0C",
    "Tp0D", "Tp0E", "Tp0G", "Tp0H", "Tp0J", "Tp0K", "Tp0L", "Tp0M", "Tp0P", "Tp0Q",
    "Tp0R", "Tp0S", "Tp0T", "Tp0U", "Tp0V", "Tp0W", "Tp0X", "Tp0Y", "Tp0Z", "Tp0a",
    "Tp0b", "Tp0c", "Tp0d", "Tp0e", "Tp0f", "Tp0g", "Tp0h", "Tp0i", "Tp0j", "Tp0k",
    "Tp0m", "Tp0n", "Tp0r", "Tp0v", "Tp0z", "Tp1F", "Tp1b", "Tp1d", "Tp1h", "Tp1j",
    "Tp1l", "Tp1p", "Tp1t", "Tp1x", "Tp1z",
    // Apple silicon GPU, neural engine and fabric
    "Tg04", "Tg05", "Tg0C", "Tg0D", "Tg0G", "Tg0H", "Tg0K", "Tg0L", "Tg0S", "Tg0T",
    "Tg0U", "Tg0X", "Tg0d", "Tg0e", "Tg0f", "Tg0j", "Tg0k", "Tg1U", "Tg1k", "Te04",
    "Te05", "Te06", "Te0G", "Te0H", "Te0L", "Te0P", "Te0S", "Te0T", "Tf04", "Tf09",
    "Tf0A", "Tf0B", "Tf0D", "Tf0E", "Tf14", "Tf18", "Tf19", "Tf1A", "Tf24", "Tf28",
    "Tf29", "Tf2A", "Tf44", "Tf49", "Tf4A", "Tf4B", "Tf4D", "Tf4E", "Ta00", "Ta04",
    "Ta08", "Ta0C", "TR0Z", "TR1d", "TR2d", "TR3d", "TR4d",
];
