//! Built-in commentary templates (Fluent).
//!
//! Message ids follow `{kind}-{n}` when a player is known and
//! `{kind}-anon-{n}` otherwise; `n` starts at 1 with no gaps.
//! Available arguments: `$player`, `$team`, `$home`, `$away`, `$mentality`.

pub const DEFAULT_LOCALE: &str = "en-US";

pub const EN_US: &str = r#"
side-home = the home side
side-away = the visitors

fallback = Play continues.

goal-1 = GOAL! { $player } finds the net for { $team }!
goal-2 = { $player } makes no mistake, and { $team } celebrate!
goal-3 = What a finish from { $player }! The crowd erupts.
goal-anon-1 = GOAL for { $team }!
goal-anon-2 = It's in! { $team } have scored.

shot-1 = { $player } lets fly, but it's wide.
shot-2 = { $player } tries his luck from distance.
shot-anon-1 = A speculative effort from { $team }.

save-1 = Great save! { $player } is denied.
save-2 = { $player } forces the keeper into action.
save-anon-1 = The goalkeeper keeps { $team } out.

chance-1 = { $player } is involved as { $team } build.
chance-anon-1 = { $team } push forward.
chance-anon-2 = A promising moment for { $team }.
chance-anon-3 = { $team } keep the ball moving.

card-1 = The referee reaches for his pocket: { $player } is booked.
card-2 = Into the book goes { $player }.
card-anon-1 = A card is shown to { $team }.

foul-1 = { $player } brings his man down. Free kick.
foul-2 = Clumsy from { $player }, the whistle goes.
foul-anon-1 = A foul by { $team }.

offside-anon-1 = The flag goes up, { $team } are caught offside.
offside-anon-2 = Offside! { $team } mistimed the run.

var-decision-anon-1 = VAR is checking the { $team } goal...
var-decision-anon-2 = The officials head to the monitor to review { $team }'s goal.

mentality-ultra-defensive = ultra-defensive
mentality-defensive = defensive
mentality-balanced = balanced
mentality-attacking = attacking
mentality-ultra-attacking = ultra-attacking

tactics-change = The manager makes a tactical adjustment, switching to a more { $mentality } approach.

ht-level-dominant = It's level at the break! The home side has dominated possession but couldn't convert it to goals.
ht-level-even = It's level at the break! An evenly matched first half!
ht-home-clinical = The home side leads at half-time! Clinical finishing against the run of play!
ht-home-deserved = The home side leads at half-time! They've been the better team and the scoreline reflects that.
ht-away-counter = The away team is ahead at the break! Impressive counter-attacking football!
ht-away-control = The away team is ahead at the break! They've controlled the game so far.

ft-draw = A fair result! Both teams can be satisfied with a point.
ft-home-dominant = Victory for the home side! Final score { $home }-{ $away }. A dominant performance!
ft-home-narrow = Victory for the home side! Final score { $home }-{ $away }. A hard-fought win!
ft-away-dominant = The away team takes all three points! Final score { $home }-{ $away }. An impressive away victory!
ft-away-narrow = The away team takes all three points! Final score { $home }-{ $away }. A crucial win!
"#;

pub const ID_ID: &str = r#"
side-home = tuan rumah
side-away = tim tamu

fallback = Momen penting berlangsung.

goal-1 = GOL! { $player } mencetak gol untuk { $team }!
goal-2 = { $player } menjebol gawang, { $team } bersorak!
goal-3 = Penyelesaian luar biasa dari { $player }!
goal-anon-1 = Gol tercipta untuk { $team }!

shot-1 = { $player } melepaskan tembakan, tapi melebar.
shot-2 = { $player } mencoba peruntungan dari jarak jauh.
shot-anon-1 = Tembakan dilepaskan oleh { $team }.

save-1 = Penyelamatan gemilang! Tembakan { $player } ditepis.
save-2 = { $player } memaksa kiper bekerja keras.
save-anon-1 = Penyelamatan oleh kiper!

chance-1 = { $player } terlibat dalam serangan { $team }.
chance-anon-1 = { $team } terus menekan.
chance-anon-2 = Peluang menjanjikan untuk { $team }.

card-1 = Kartu kuning untuk { $player }.
card-2 = Wasit mengeluarkan kartu untuk { $player }.
card-anon-1 = Kartu kuning dikeluarkan.

foul-1 = Pelanggaran oleh { $player }.
foul-2 = { $player } menjatuhkan lawan, tendangan bebas.
foul-anon-1 = Pelanggaran terjadi.

offside-anon-1 = Offside! Bendera hakim garis terangkat untuk { $team }.
offside-anon-2 = Offside!

var-decision-anon-1 = VAR sedang memeriksa gol { $team }...
var-decision-anon-2 = Wasit meninjau layar VAR untuk gol { $team }.

mentality-ultra-defensive = sangat bertahan
mentality-defensive = bertahan
mentality-balanced = seimbang
mentality-attacking = menyerang
mentality-ultra-attacking = sangat menyerang

tactics-change = Pelatih melakukan penyesuaian taktik, beralih ke pendekatan yang lebih { $mentality }.

ht-level-dominant = Skor imbang saat turun minum! Tuan rumah menguasai bola tetapi gagal mencetak gol.
ht-level-even = Skor imbang saat turun minum! Babak pertama yang berimbang!
ht-home-clinical = Tuan rumah unggul saat turun minum! Penyelesaian yang klinis!
ht-home-deserved = Tuan rumah unggul saat turun minum! Mereka tampil lebih baik.
ht-away-counter = Tim tamu unggul saat turun minum! Serangan balik yang mengesankan!
ht-away-control = Tim tamu unggul saat turun minum! Mereka mengendalikan permainan.

ft-draw = Hasil yang adil! Kedua tim berbagi satu poin.
ft-home-dominant = Kemenangan untuk tuan rumah! Skor akhir { $home }-{ $away }. Penampilan dominan!
ft-home-narrow = Kemenangan untuk tuan rumah! Skor akhir { $home }-{ $away }. Kemenangan yang diperjuangkan!
ft-away-dominant = Tim tamu membawa pulang tiga poin! Skor akhir { $home }-{ $away }. Kemenangan tandang yang mengesankan!
ft-away-narrow = Tim tamu membawa pulang tiga poin! Skor akhir { $home }-{ $away }. Kemenangan penting!
"#;

/// `(locale, ftl source)` pairs shipped with the crate.
pub fn builtin() -> [(&'static str, &'static str); 2] {
    [("en-US", EN_US), ("id-ID", ID_ID)]
}
