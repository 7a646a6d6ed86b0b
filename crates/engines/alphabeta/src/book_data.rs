// Opening lines of the built-in book: move-history token, then the reply.

pub(crate) const BUILTIN_ENTRIES: &[(&str, u8, u8)] = &[
    ("", 3, 5),
    ("35", 2, 3),
    ("3523", 5, 2),
    ("3525", 2, 4),
    ("3545", 5, 4),
    ("352332", 4, 5),
    ("352342", 5, 3),
    ("352352", 4, 5),
    ("352524", 4, 5),
    ("354554", 2, 5),
    ("35233245", 5, 4),
    ("35234253", 5, 2),
    ("35235245", 2, 5),
    ("35235253", 4, 2),
    ("35252445", 3, 6),
    ("35455425", 5, 3),
    ("3523324554", 2, 2),
    ("3523425352", 4, 5),
    ("3523524525", 5, 3),
    ("3523525342", 4, 5),
    ("3525244526", 2, 3),
    ("3525244536", 2, 3),
    ("3525244554", 3, 2),
    ("3545542553", 6, 4),
    ("352332455422", 5, 3),
    ("352342535245", 2, 5),
    ("352352452553", 4, 2),
    ("352352534245", 2, 5),
    ("352524452623", 5, 4),
    ("352524453614", 1, 3),
    ("352524453623", 1, 5),
    ("352524453626", 1, 4),
    ("352524455423", 4, 6),
    ("352524455432", 4, 2),
    ("354554255364", 5, 5),
    ("35233245542224", 2, 5),
    ("35233245542253", 2, 5),
    ("35234253524525", 5, 5),
    ("35234253524532", 5, 1),
    ("35235245255342", 5, 5),
    ("35235253424525", 5, 5),
    ("35235253424532", 5, 1),
    ("35252445262354", 5, 5),
    ("35252445361413", 2, 3),
    ("35252445361454", 2, 6),
    ("35252445362313", 1, 4),
    ("35252445362314", 2, 6),
    ("35252445362315", 4, 6),
    ("35252445362353", 5, 4),
    ("35252445362614", 2, 3),
    ("35252445362646", 1, 4),
    ("35252445542322", 3, 2),
    ("35252445542342", 5, 5),
    ("35252445542346", 5, 3),
    ("35252445543222", 2, 3),
    ("35252445543236", 5, 6),
    ("35252445543242", 1, 4),
    ("35455425536455", 6, 5),
    ("3523324554222425", 4, 6),
    ("3523324554225325", 2, 4),
    ("3523425352452536", 2, 4),
    ("3523425352452555", 2, 4),
    ("3523425352453251", 6, 2),
    ("3523524525534236", 2, 4),
    ("3523524525534255", 2, 4),
    ("3523525342452536", 2, 4),
    ("3523525342452555", 2, 4),
    ("3523525342453251", 6, 2),
    ("3525244526235455", 4, 6),
    ("3525244536141323", 5, 5),
    ("3525244536145426", 2, 3),
    ("3525244536145455", 5, 3),
    ("3525244536231314", 5, 5),
    ("3525244536231415", 5, 4),
    ("3525244536231426", 3, 2),
    ("3525244536231546", 5, 5),
    ("3525244536235354", 3, 2),
    ("3525244536261423", 3, 2),
    ("3525244536261437", 5, 4),
    ("3525244536264614", 5, 5),
    ("3525244554232232", 1, 4),
    ("3525244554234255", 5, 6),
    ("3525244554234264", 1, 5),
    ("3525244554234653", 5, 2),
    ("3525244554322223", 1, 4),
    ("3525244554323656", 2, 2),
    ("3525244554324213", 2, 2),
    ("3525244554324214", 2, 2),
    ("3545542553645565", 2, 4),
];
