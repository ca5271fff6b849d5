/// The qualitative "Set3" palette, reused cyclically by label rank.
pub const SET3: [&str; 12] = [
    "rgb(141,211,199)",
    "rgb(255,255,179)",
    "rgb(190,186,218)",
    "rgb(251,128,114)",
    "rgb(128,177,211)",
    "rgb(253,180,98)",
    "rgb(179,222,105)",
    "rgb(252,205,229)",
    "rgb(217,217,217)",
    "rgb(188,128,189)",
    "rgb(204,235,197)",
    "rgb(255,237,111)",
];

pub fn color_for_rank(rank: usize) -> &'static str {
    SET3[rank % SET3.len()]
}
